//! Offer browsing and booking.

use clap::{Args, Subcommand};
use sphere_app::{
    context::AppContext,
    offers::{Offer, OfferId},
};
use tabled::{Table, Tabled};

use super::CliError;

#[derive(Debug, Args)]
pub struct OffersCommand {
    #[command(subcommand)]
    command: OffersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OffersSubcommand {
    /// List the current offers
    List(ListArgs),
    /// Book one slot of an offer
    Book(BookArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Filter by offer name substring
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Args)]
struct BookArgs {
    /// Offer id to book
    offer_id: i64,
}

#[derive(Tabled)]
struct OfferRow {
    id: i64,
    name: String,
    price: String,
    slots: u32,
    rating: u8,
}

impl From<&Offer> for OfferRow {
    fn from(offer: &Offer) -> Self {
        Self {
            id: offer.id.into_raw(),
            name: offer.offer_name.clone(),
            price: format!("Ksh. {}", offer.offer_price),
            slots: offer.slots_limit,
            rating: offer.rating,
        }
    }
}

pub async fn run(ctx: &AppContext, command: OffersCommand) -> Result<(), CliError> {
    match command.command {
        OffersSubcommand::List(args) => {
            let mut offers = ctx.offers();
            offers.load().await?;
            if let Some(term) = args.search {
                offers.search(term);
            }

            let rows: Vec<OfferRow> = offers.view().into_iter().map(OfferRow::from).collect();
            println!("{}", Table::new(rows));
            Ok(())
        }
        OffersSubcommand::Book(args) => {
            let mut offers = ctx.offers();
            offers.load().await?;

            let id = OfferId::from_raw(args.offer_id);
            offers.book(id).await?;

            let slots = offers
                .offers()
                .iter()
                .find(|offer| offer.id == id)
                .map_or(0, |offer| offer.slots_limit);
            println!("booked offer {id}, {slots} slots left");
            Ok(())
        }
    }
}

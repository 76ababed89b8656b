use crate::infra::{InMemorySavedListingStore, JsonFileSavedListingStore};
use clap::Args;
use rehab_scout::config::AppConfig;
use rehab_scout::error::AppError;
use rehab_scout::listings::{
    FilterSpec, Listing, ListingFeedImporter, ListingService, SavedListingStore, SearchResults,
    SortOrder,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Listing feed to value (provider JSON, or CSV by extension)
    #[arg(long)]
    pub(crate) feed: PathBuf,
    /// Case-insensitive city substring
    #[arg(long)]
    pub(crate) location: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) min_price: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) max_price: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) min_beds: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) min_baths: Option<f64>,
    /// Minimum rehab potential score (0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) min_rehab: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) min_sqft: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) max_year_built: Option<f64>,
    /// investment, rehab, price-low, or price-high
    #[arg(long, default_value = "investment", value_parser = crate::infra::parse_sort)]
    pub(crate) sort: SortOrder,
    /// Pin the valuation year (defaults to the configured or current year)
    #[arg(long)]
    pub(crate) as_of_year: Option<i32>,
    /// Override the market average price per square foot
    #[arg(long, value_parser = crate::infra::parse_market_rate)]
    pub(crate) market_rate: Option<f64>,
    /// JSON file of saved listing ids used to mark results
    #[arg(long)]
    pub(crate) saved: Option<PathBuf>,
    /// Print at most this many listings
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Emit the full result set as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

impl SearchArgs {
    fn filter(&self) -> FilterSpec {
        FilterSpec {
            location: self.location.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            min_beds: self.min_beds,
            min_baths: self.min_baths,
            min_rehab_potential: self.min_rehab,
            min_square_feet: self.min_sqft,
            max_year_built: self.max_year_built,
        }
    }
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(rate) = args.market_rate {
        config.valuation.area_avg_price_per_sqft = rate;
    }
    if let Some(year) = args.as_of_year {
        config.valuation.as_of_year = Some(year);
    }

    match args.saved.clone().or(config.saved_listings_path.clone()) {
        Some(path) => search_with(&config, Arc::new(JsonFileSavedListingStore::new(path)), &args),
        None => search_with(&config, Arc::new(InMemorySavedListingStore::default()), &args),
    }
}

fn search_with<S>(config: &AppConfig, store: Arc<S>, args: &SearchArgs) -> Result<(), AppError>
where
    S: SavedListingStore + 'static,
{
    let service = ListingService::new(config.valuation.engine(), store);
    let raws = ListingFeedImporter::from_path(&args.feed)?;
    let mut results = service.search(&raws, &args.filter(), args.sort)?;
    if let Some(limit) = args.limit {
        results.listings.truncate(limit);
    }

    if args.json {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Search results unavailable as JSON: {err}"),
        }
    } else {
        render_results(&results, args.sort, service.engine().as_of_year());
    }

    Ok(())
}

fn render_results(results: &SearchResults, sort: SortOrder, as_of_year: i32) {
    let summary = &results.summary;
    println!("Rehab Scout listing search (valued as of {as_of_year})");
    println!(
        "{} of {} listings matched | sorted by {}",
        summary.total,
        results.scanned,
        sort.label()
    );
    if summary.total == 0 {
        println!("No listings match the current filters.");
        return;
    }

    println!(
        "Average investment score {:.1} | average rehab potential {:.1} | total potential profit ${:.0}",
        summary.average_investment_score,
        summary.average_rehab_potential,
        summary.total_potential_profit
    );
    let tiers: Vec<String> = summary
        .rehab_tiers
        .iter()
        .map(|entry| format!("{} {}", entry.tier_label, entry.count))
        .collect();
    println!("Rehab tiers: {}", tiers.join(" | "));
    if let Some(best) = &summary.best_listing_id {
        println!("Best investment: {best}");
    }

    println!();
    for listing in &results.listings {
        println!("{}", listing_line(listing));
    }
}

fn listing_line(listing: &Listing) -> String {
    let roi = listing
        .roi_percent()
        .map(|roi| format!("{roi:.1}%"))
        .unwrap_or_else(|| "n/a".to_string());
    let saved = if listing.is_saved { " [saved]" } else { "" };
    let location = [listing.address.as_str(), listing.city.as_str(), listing.state.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "- {}{saved}: {} | ${:.0} | {} bd / {} ba | score {} | rehab {} ({}) | profit ${:.0} | ROI {roi}",
        listing.id,
        if location.is_empty() { "unknown address" } else { location.as_str() },
        listing.price,
        listing.bedrooms,
        listing.bathrooms,
        listing.investment_score,
        listing.rehab_potential,
        listing.rehab_tier().label(),
        listing.potential_profit,
    )
}

use crate::common_scraper::{FetchedPage, PageSource};
use crate::debug_println;
use crate::models::Car;
use crate::parser;
use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const LISTING_SELECTOR: &str = r#"a[data-ftid="bulls-list_bull"]"#;
const TITLE_SELECTOR: &str = r#"span[data-ftid="bull_title"]"#;
const DESCRIPTION_SELECTOR: &str = r#"div[data-ftid="component_inline-bull-description"]"#;
const PRICE_SELECTOR: &str = r#"span[data-ftid="bull_price"]"#;

/// `https://auto.drom.ru/` + 3 -> `https://auto.drom.ru/all/page3`
pub fn page_url(base_url: &str, page: usize) -> String {
    format!("{}all/page{}", base_url, page)
}

/// Fetches listing pages over blocking HTTP.
pub struct HttpPageSource {
    client: reqwest::blocking::Client,
}

impl HttpPageSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl PageSource for HttpPageSource {
    fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug_println!("Fetching listing page: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .context(format!("Failed to fetch listing page: {}", url))?;

        let status = response.status().as_u16();
        let body = response.text().context("Failed to read response body")?;

        Ok(FetchedPage { status, body })
    }
}

/// Compiled selectors for the listing markup.
pub struct ListingSelectors {
    listing: Selector,
    title: Selector,
    description: Selector,
    price: Selector,
}

impl ListingSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            listing: parse_selector(LISTING_SELECTOR)?,
            title: parse_selector(TITLE_SELECTOR)?,
            description: parse_selector(DESCRIPTION_SELECTOR)?,
            price: parse_selector(PRICE_SELECTOR)?,
        })
    }

    /// All listing anchors of a page, in document order.
    pub fn listings<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(&self.listing).collect()
    }

    /// Extracts the car at a fixed slot index. A slot past the end of the
    /// anchors found is an error like any other malformed listing.
    pub fn parse_slot(&self, listings: &[ElementRef], slot: usize) -> Result<Car> {
        let listing = listings.get(slot).with_context(|| {
            format!(
                "Listing slot {} not found on page ({} listings)",
                slot,
                listings.len()
            )
        })?;
        self.parse_listing(*listing)
    }

    pub fn parse_listing(&self, listing: ElementRef) -> Result<Car> {
        let title = child_text(listing, &self.title).context("Title not found in listing")?;
        let description = child_text(listing, &self.description)
            .context("Description not found in listing")?;
        let price = child_text(listing, &self.price).context("Price not found in listing")?;

        parser::parse_car(&title, &description, &price)
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| anyhow::anyhow!("Failed to parse selector {}: {:?}", selector, e))
}

fn child_text(element: ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <a data-ftid="bulls-list_bull" href="/toyota/camry/1.html">
            <span data-ftid="bull_title">Toyota Camry, 2015</span>
            <div data-ftid="component_inline-bull-description"><span>2.5 л (181 л.с.)</span>, <span>бензин</span>, <span>АКПП</span>, <span>передний</span>, <span>98 000 км</span></div>
            <span data-ftid="bull_price">1 950 000 <span>₽</span></span>
        </a>
        <a data-ftid="bulls-list_bull" href="/lada/vesta/2.html">
            <span data-ftid="bull_title">Lada Vesta, 2019</span>
            <span data-ftid="bull_price">900 000 ₽</span>
        </a>
        <a href="/not-a-listing">ad</a>
        </body></html>
    "#;

    #[test]
    fn test_page_url() {
        assert_eq!(
            page_url("https://auto.drom.ru/", 7),
            "https://auto.drom.ru/all/page7"
        );
    }

    #[test]
    fn test_listings_match_marker_only() {
        let selectors = ListingSelectors::new().unwrap();
        let document = Html::parse_document(PAGE);
        assert_eq!(selectors.listings(&document).len(), 2);
    }

    #[test]
    fn test_parse_slot_reads_nested_text() {
        let selectors = ListingSelectors::new().unwrap();
        let document = Html::parse_document(PAGE);
        let listings = selectors.listings(&document);

        let car = selectors.parse_slot(&listings, 0).unwrap();
        assert_eq!(car.name, "Toyota Camry");
        assert_eq!(car.year, 2015);
        assert_eq!(car.engine_capacity, 2.5);
        assert_eq!(car.horse_power, 181);
        assert_eq!(car.fuel, "бензин");
        assert_eq!(car.transmission, "АКПП");
        assert_eq!(car.drive_unit, "передний");
        assert_eq!(car.mileage, 98000);
        assert_eq!(car.price, 1950000);
    }

    #[test]
    fn test_parse_slot_missing_description() {
        let selectors = ListingSelectors::new().unwrap();
        let document = Html::parse_document(PAGE);
        let listings = selectors.listings(&document);

        let err = selectors.parse_slot(&listings, 1).unwrap_err();
        assert!(err.to_string().contains("Description not found"));
    }

    #[test]
    fn test_parse_slot_out_of_range() {
        let selectors = ListingSelectors::new().unwrap();
        let document = Html::parse_document(PAGE);
        let listings = selectors.listings(&document);

        let err = selectors.parse_slot(&listings, 5).unwrap_err();
        assert!(err.to_string().contains("slot 5 not found"));
    }
}

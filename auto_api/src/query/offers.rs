use url::Url;

use super::Query;

/// Search parameters for the offers listing.
///
/// `page` is always sent. Every filter is optional and only appended to the
/// request when set, so `Some(0)` is sent while `None` is not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OffersQuery {
    pub page: i64,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub configuration: Option<String>,
    pub complectation: Option<String>,
    pub transmission: Option<String>,
    pub color: Option<String>,
    pub body_type: Option<String>,
    pub engine_type: Option<String>,
    pub year_from: Option<i64>,
    pub year_to: Option<i64>,
    pub mileage_from: Option<i64>,
    pub mileage_to: Option<i64>,
    pub price_from: Option<i64>,
    pub price_to: Option<i64>,
}

impl Query for OffersQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &self.page.to_string());

            let text_filters = [
                ("brand", &self.brand),
                ("model", &self.model),
                ("configuration", &self.configuration),
                ("complectation", &self.complectation),
                ("transmission", &self.transmission),
                ("color", &self.color),
                ("body_type", &self.body_type),
                ("engine_type", &self.engine_type),
            ];
            for (key, value) in text_filters {
                if let Some(value) = value {
                    pairs.append_pair(key, value);
                }
            }

            let range_filters = [
                ("year_from", self.year_from),
                ("year_to", self.year_to),
                ("mileage_from", self.mileage_from),
                ("mileage_to", self.mileage_to),
                ("price_from", self.price_from),
                ("price_to", self.price_to),
            ];
            for (key, value) in range_filters {
                if let Some(value) = value {
                    pairs.append_pair(key, &value.to_string());
                }
            }
        }
        url
    }
}

impl OffersQuery {
    /// Creates a query for the given page with no filters.
    pub fn new(page: i64) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Returns a copy of this query pointing at another page, keeping all filters.
    pub fn for_page(&self, page: i64) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn with_brand(mut self, brand: &str) -> Self {
        self.brand = Some(brand.to_string());
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    pub fn with_configuration(mut self, configuration: &str) -> Self {
        self.configuration = Some(configuration.to_string());
        self
    }

    pub fn with_complectation(mut self, complectation: &str) -> Self {
        self.complectation = Some(complectation.to_string());
        self
    }

    pub fn with_transmission(mut self, transmission: &str) -> Self {
        self.transmission = Some(transmission.to_string());
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn with_body_type(mut self, body_type: &str) -> Self {
        self.body_type = Some(body_type.to_string());
        self
    }

    pub fn with_engine_type(mut self, engine_type: &str) -> Self {
        self.engine_type = Some(engine_type.to_string());
        self
    }

    /// Restricts the model year, both bounds inclusive.
    pub fn with_year_range(mut self, from: Option<i64>, to: Option<i64>) -> Self {
        self.year_from = from;
        self.year_to = to;
        self
    }

    pub fn with_year_from(mut self, year_from: i64) -> Self {
        self.year_from = Some(year_from);
        self
    }

    pub fn with_year_to(mut self, year_to: i64) -> Self {
        self.year_to = Some(year_to);
        self
    }

    pub fn with_mileage_from(mut self, mileage_from: i64) -> Self {
        self.mileage_from = Some(mileage_from);
        self
    }

    pub fn with_mileage_to(mut self, mileage_to: i64) -> Self {
        self.mileage_to = Some(mileage_to);
        self
    }

    pub fn with_price_from(mut self, price_from: i64) -> Self {
        self.price_from = Some(price_from);
        self
    }

    pub fn with_price_to(mut self, price_to: i64) -> Self {
        self.price_to = Some(price_to);
        self
    }
}

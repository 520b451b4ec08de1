//! Search parameters: place, date filter and how many results to ask for.

use std::fmt;
use std::str::FromStr;

use crate::error::{EventMapError, EventMapResult};

/// The backend pages results ten at a time.
pub const RESULTS_PER_PAGE: u32 = 10;

/// Result counts the host offers in its filter picker.
pub const RESULT_COUNT_CHOICES: [u32; 3] = [10, 20, 30];

/// A date window understood by the backend. One is selected at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFilter {
    Today,
    Tomorrow,
    Week,
    Weekend,
    NextWeek,
    Month,
    NextMonth,
}

impl DateFilter {
    pub const ALL: [DateFilter; 7] = [
        DateFilter::Today,
        DateFilter::Tomorrow,
        DateFilter::Week,
        DateFilter::Weekend,
        DateFilter::NextWeek,
        DateFilter::Month,
        DateFilter::NextMonth,
    ];

    /// The opaque token passed through to the backend.
    pub fn token(&self) -> &'static str {
        match self {
            DateFilter::Today => "date:today",
            DateFilter::Tomorrow => "date:tomorrow",
            DateFilter::Week => "date:week",
            DateFilter::Weekend => "date:weekend",
            DateFilter::NextWeek => "date:next_week",
            DateFilter::Month => "date:month",
            DateFilter::NextMonth => "date:next_month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateFilter::Today => "Today",
            DateFilter::Tomorrow => "Tomorrow",
            DateFilter::Week => "This Week",
            DateFilter::Weekend => "This Weekend",
            DateFilter::NextWeek => "Next Week",
            DateFilter::Month => "This Month",
            DateFilter::NextMonth => "Next Month",
        }
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DateFilter {
    type Err = EventMapError;

    /// Accepts the full token (`date:next_week`) or its short name (`next_week`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = name.strip_prefix("date:").unwrap_or(name);
        DateFilter::ALL
            .into_iter()
            .find(|f| &f.token()["date:".len()..] == name)
            .ok_or_else(|| {
                let valid: Vec<_> = DateFilter::ALL.iter().map(|f| f.token()).collect();
                EventMapError::InvalidQuery(format!(
                    "Unknown date filter '{}'. Expected one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// One search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub city: String,
    pub date_filter: Option<DateFilter>,
    pub result_count: u32,
}

impl SearchQuery {
    pub fn new(city: impl Into<String>) -> Self {
        SearchQuery {
            city: city.into(),
            date_filter: None,
            result_count: RESULTS_PER_PAGE,
        }
    }

    pub fn with_date_filter(mut self, filter: DateFilter) -> Self {
        self.date_filter = Some(filter);
        self
    }

    pub fn with_result_count(mut self, count: u32) -> Self {
        self.result_count = count;
        self
    }

    /// Pages to request: `result_count / 10`, never less than one.
    pub fn num_pages(&self) -> u32 {
        (self.result_count / RESULTS_PER_PAGE).max(1)
    }

    /// Comma-separated filter tokens, empty when no filter is selected.
    pub fn date_filters(&self) -> String {
        self.date_filter
            .map(|f| f.token().to_string())
            .unwrap_or_default()
    }

    pub fn validate(&self) -> EventMapResult<()> {
        if self.city.trim().is_empty() {
            return Err(EventMapError::InvalidQuery("City must not be empty".into()));
        }
        if self.result_count == 0 {
            return Err(EventMapError::InvalidQuery(
                "Result count must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tokens_and_short_names() {
        assert_eq!("date:weekend".parse::<DateFilter>().unwrap(), DateFilter::Weekend);
        assert_eq!("next_month".parse::<DateFilter>().unwrap(), DateFilter::NextMonth);
        assert!("date:yesterday".parse::<DateFilter>().is_err());
    }

    #[test]
    fn every_filter_round_trips_through_its_token() {
        for filter in DateFilter::ALL {
            assert_eq!(filter.token().parse::<DateFilter>().unwrap(), filter);
        }
    }

    #[test]
    fn page_count_is_result_count_over_ten() {
        assert_eq!(SearchQuery::new("Austin").num_pages(), 1);
        assert_eq!(SearchQuery::new("Austin").with_result_count(30).num_pages(), 3);
        assert_eq!(SearchQuery::new("Austin").with_result_count(5).num_pages(), 1);
    }

    #[test]
    fn date_filters_is_empty_without_a_selection() {
        let query = SearchQuery::new("Austin");
        assert_eq!(query.date_filters(), "");
        let query = query.with_date_filter(DateFilter::Today);
        assert_eq!(query.date_filters(), "date:today");
    }

    #[test]
    fn rejects_blank_city_and_zero_results() {
        assert!(SearchQuery::new("  ").validate().is_err());
        assert!(SearchQuery::new("Austin").with_result_count(0).validate().is_err());
        assert!(SearchQuery::new("Austin").validate().is_ok());
    }
}

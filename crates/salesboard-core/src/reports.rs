//! Report structures for API responses

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use super::Transaction;

/// Body of `/initialize-database`
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct InitializeResponse {
    pub message: String,
}

/// Body of `/list-transactions`
#[derive(Debug, Clone, serde::Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

/// Month statistics
///
/// `not_sold_items` is the store size minus the month matches. It does not
/// look at the `sold` flag of each record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_sale_amount: f64,
    pub sold_items: usize,
    pub not_sold_items: usize,
}

/// Fixed price range used by the bar chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBucket {
    pub label: &'static str,
    /// Inclusive upper bound
    pub upper: f64,
}

pub const PRICE_BUCKETS: [PriceBucket; 10] = [
    PriceBucket { label: "0-100", upper: 100.0 },
    PriceBucket { label: "101-200", upper: 200.0 },
    PriceBucket { label: "201-300", upper: 300.0 },
    PriceBucket { label: "301-400", upper: 400.0 },
    PriceBucket { label: "401-500", upper: 500.0 },
    PriceBucket { label: "501-600", upper: 600.0 },
    PriceBucket { label: "601-700", upper: 700.0 },
    PriceBucket { label: "701-800", upper: 800.0 },
    PriceBucket { label: "801-900", upper: 900.0 },
    PriceBucket { label: "901-above", upper: f64::INFINITY },
];

/// Count per price range, always all ten ranges in fixed order
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    counts: [usize; PRICE_BUCKETS.len()],
}

impl Default for BarChart {
    fn default() -> Self {
        Self {
            counts: [0; PRICE_BUCKETS.len()],
        }
    }
}

impl BarChart {
    /// Index of the first bucket whose upper bound covers `price`
    pub fn bucket_index(price: f64) -> usize {
        PRICE_BUCKETS
            .iter()
            .position(|bucket| price <= bucket.upper)
            .unwrap_or(PRICE_BUCKETS.len() - 1)
    }

    pub fn add(&mut self, price: f64) {
        self.counts[Self::bucket_index(price)] += 1;
    }

    pub fn count(&self, label: &str) -> Option<usize> {
        PRICE_BUCKETS
            .iter()
            .position(|bucket| bucket.label == label)
            .map(|i| self.counts[i])
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        PRICE_BUCKETS.iter().zip(self.counts.iter()).map(|(b, c)| (b.label, *c))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl Serialize for BarChart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PRICE_BUCKETS.len()))?;
        for (label, count) in self.entries() {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}

/// Count per category, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PieChart {
    entries: Vec<(String, usize)>,
}

impl PieChart {
    pub fn add(&mut self, category: &str) {
        match self.entries.iter_mut().find(|(c, _)| c == category) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((category.to_string(), 1)),
        }
    }

    pub fn count(&self, category: &str) -> Option<usize> {
        self.entries.iter().find(|(c, _)| c == category).map(|(_, n)| *n)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

impl Serialize for PieChart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, count) in &self.entries {
            map.serialize_entry(category, count)?;
        }
        map.end()
    }
}

/// Body of `/bar-chart`
#[derive(Debug, Clone, serde::Serialize)]
pub struct BarChartResponse {
    pub bar_chart_data: BarChart,
}

/// Body of `/pie-chart`
#[derive(Debug, Clone, serde::Serialize)]
pub struct PieChartResponse {
    pub pie_chart_data: PieChart,
}

/// Body of `/combined-response`
#[derive(Debug, Clone, serde::Serialize)]
pub struct CombinedResponse {
    pub initialize: InitializeResponse,
    pub list_transactions: TransactionsResponse,
    pub statistics: Statistics,
    pub bar_chart: BarChartResponse,
    pub pie_chart: PieChartResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(BarChart::bucket_index(0.0), 0);
        assert_eq!(BarChart::bucket_index(100.0), 0);
        assert_eq!(BarChart::bucket_index(100.5), 1);
        assert_eq!(BarChart::bucket_index(101.0), 1);
        assert_eq!(BarChart::bucket_index(900.0), 8);
        assert_eq!(BarChart::bucket_index(900.01), 9);
        assert_eq!(BarChart::bucket_index(25_000.0), 9);
    }

    #[test]
    fn test_bar_chart_serializes_all_buckets_in_order() {
        let mut chart = BarChart::default();
        chart.add(50.0);
        chart.add(999.0);

        let json = serde_json::to_string(&chart).unwrap();
        assert_eq!(
            json,
            r#"{"0-100":1,"101-200":0,"201-300":0,"301-400":0,"401-500":0,"501-600":0,"601-700":0,"701-800":0,"801-900":0,"901-above":1}"#
        );
        assert_eq!(chart.total(), 2);
    }

    #[test]
    fn test_pie_chart_keeps_first_appearance_order() {
        let mut chart = PieChart::default();
        chart.add("jewelery");
        chart.add("electronics");
        chart.add("jewelery");
        chart.add("Electronics");

        let json = serde_json::to_string(&chart).unwrap();
        assert_eq!(json, r#"{"jewelery":2,"electronics":1,"Electronics":1}"#);
        assert_eq!(chart.len(), 3);
        assert_eq!(chart.count("electronics"), Some(1));
        assert_eq!(chart.count("books"), None);
    }

    #[test]
    fn test_statistics_field_names() {
        let stats = Statistics {
            total_sale_amount: 12.5,
            sold_items: 1,
            not_sold_items: 3,
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalSaleAmount"], 12.5);
        assert_eq!(value["soldItems"], 1);
        assert_eq!(value["notSoldItems"], 3);
    }
}

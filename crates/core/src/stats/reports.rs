//! Individual statistics reports.

use std::collections::HashMap;

use super::types::{
    BasicCounts, Bucket, CategoryCount, CategoryField, CategoryReport, PriceReport, RuntimeReport,
};
use crate::catalog::CatalogRecord;

/// Price histogram upper bounds (exclusive), in currency units.
pub const PRICE_BOUNDS: [f64; 3] = [10.0, 20.0, 30.0];
const PRICE_LABELS: [&str; 4] = ["Under 10", "10-20", "20-30", "30 and over"];

/// Runtime histogram upper bounds (exclusive), in seconds.
pub const RUNTIME_BOUNDS: [f64; 3] = [1800.0, 3600.0, 7200.0];
const RUNTIME_LABELS: [&str; 4] = ["Under 30 min", "30-60 min", "1-2 hours", "2 hours and over"];

/// Percentage of `count` in `total`, or 0 when `total` is 0.
pub(crate) fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Count `values` into `bounds.len() + 1` buckets.
///
/// Bucket `i` holds values below `bounds[i]` and at or above `bounds[i - 1]`;
/// the last bucket is open-ended.
fn histogram(values: &[f64], bounds: &[f64], labels: &[&str]) -> Vec<Bucket> {
    let mut counts = vec![0usize; bounds.len() + 1];
    for value in values {
        let index = bounds.iter().take_while(|bound| *value >= **bound).count();
        counts[index] += 1;
    }
    counts
        .into_iter()
        .zip(labels)
        .map(|(count, label)| Bucket {
            label: label.to_string(),
            count,
            percent: percent(count, values.len()),
        })
        .collect()
}

/// Total, available and new-arrival counts.
pub fn basic_counts(records: &[CatalogRecord]) -> BasicCounts {
    let total = records.len();
    let available = records.iter().filter(|r| r.available_for_sale).count();
    let new_arrivals = records.iter().filter(|r| r.is_new_arrival()).count();

    BasicCounts {
        total,
        available,
        available_percent: percent(available, total),
        new_arrivals,
        new_arrival_percent: percent(new_arrivals, total),
    }
}

/// Price distribution over records with a price above zero.
pub fn price_report(records: &[CatalogRecord]) -> PriceReport {
    let mut prices: Vec<f64> = records
        .iter()
        .filter_map(|r| r.price)
        .filter(|price| *price > 0.0)
        .collect();
    prices.sort_by(f64::total_cmp);

    let count = prices.len();
    let buckets = histogram(&prices, &PRICE_BOUNDS, &PRICE_LABELS);
    if count == 0 {
        return PriceReport {
            count,
            mean: None,
            median: None,
            min: None,
            max: None,
            buckets,
        };
    }

    PriceReport {
        count,
        mean: Some(prices.iter().sum::<f64>() / count as f64),
        median: Some(prices[count / 2]),
        min: prices.first().copied(),
        max: prices.last().copied(),
        buckets,
    }
}

/// Runtime distribution over records with a known runtime.
pub fn runtime_report(records: &[CatalogRecord]) -> RuntimeReport {
    let runtimes: Vec<f64> = records
        .iter()
        .filter_map(CatalogRecord::known_runtime)
        .map(|secs| secs as f64)
        .collect();

    let count = runtimes.len();
    let total_secs: f64 = runtimes.iter().sum();

    RuntimeReport {
        count,
        mean_minutes: (count > 0).then(|| total_secs / count as f64 / 60.0),
        total_hours: total_secs / 3600.0,
        buckets: histogram(&runtimes, &RUNTIME_BOUNDS, &RUNTIME_LABELS),
    }
}

/// Most frequent labels of `field`, at most `top_n` of them.
///
/// List fields are flattened across all records. Authors skip records with
/// no known author. Percentages are relative to the total record count.
pub fn category_report(
    records: &[CatalogRecord],
    field: CategoryField,
    top_n: usize,
) -> CategoryReport {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for record in records {
        for label in labels_of(record, field) {
            match index.get(label) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(label, counts.len());
                    counts.push((label, 1));
                }
            }
        }
    }

    let distinct = counts.len();
    // Stable sort: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top_n);

    CategoryReport {
        field,
        distinct,
        entries: counts
            .into_iter()
            .map(|(label, count)| CategoryCount {
                label: label.to_string(),
                count,
                percent: percent(count, records.len()),
            })
            .collect(),
    }
}

fn labels_of(record: &CatalogRecord, field: CategoryField) -> Vec<&str> {
    match field {
        CategoryField::ContentType => record.content_type.iter().map(String::as_str).collect(),
        CategoryField::Language => record.languages.iter().map(String::as_str).collect(),
        CategoryField::Author if record.has_known_author() => vec![record.author.as_str()],
        CategoryField::Author => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NEW_ARRIVAL_FLAG;

    fn priced(price: Option<f64>) -> CatalogRecord {
        let mut record = CatalogRecord::titled("Priced");
        record.price = price;
        record
    }

    fn timed(runtime: Option<u64>) -> CatalogRecord {
        let mut record = CatalogRecord::titled("Timed");
        record.runtime = runtime;
        record
    }

    fn counts(buckets: &[Bucket]) -> Vec<usize> {
        buckets.iter().map(|b| b.count).collect()
    }

    #[test]
    fn test_basic_counts() {
        let mut a = CatalogRecord::titled("A");
        a.available_for_sale = true;
        let mut b = CatalogRecord::titled("B");
        b.available_for_sale = true;
        b.flag = Some(NEW_ARRIVAL_FLAG.into());
        let c = CatalogRecord::titled("C");
        let d = CatalogRecord::titled("D");

        let basic = basic_counts(&[a, b, c, d]);
        assert_eq!(basic.total, 4);
        assert_eq!(basic.available, 2);
        assert_eq!(basic.available_percent, 50.0);
        assert_eq!(basic.new_arrivals, 1);
        assert_eq!(basic.new_arrival_percent, 25.0);
    }

    #[test]
    fn test_basic_counts_empty() {
        let basic = basic_counts(&[]);
        assert_eq!(basic.total, 0);
        assert_eq!(basic.available_percent, 0.0);
        assert_eq!(basic.new_arrival_percent, 0.0);
    }

    #[test]
    fn test_price_buckets_one_each() {
        let records: Vec<_> = [5.0, 15.0, 25.0, 35.0]
            .into_iter()
            .map(|p| priced(Some(p)))
            .collect();
        let report = price_report(&records);

        assert_eq!(counts(&report.buckets), vec![1, 1, 1, 1]);
        assert_eq!(report.buckets[0].percent, 25.0);
        assert_eq!(report.mean, Some(20.0));
        assert_eq!(report.min, Some(5.0));
        assert_eq!(report.max, Some(35.0));
    }

    #[test]
    fn test_price_bucket_boundaries() {
        let records: Vec<_> = [9.99, 10.0, 19.99, 20.0, 30.0]
            .into_iter()
            .map(|p| priced(Some(p)))
            .collect();
        let report = price_report(&records);
        assert_eq!(counts(&report.buckets), vec![1, 2, 1, 1]);
    }

    #[test]
    fn test_price_median_is_upper_median() {
        let records: Vec<_> = [40.0, 10.0, 30.0, 20.0]
            .into_iter()
            .map(|p| priced(Some(p)))
            .collect();
        assert_eq!(price_report(&records).median, Some(30.0));

        let records: Vec<_> = [3.0, 1.0, 2.0].into_iter().map(|p| priced(Some(p))).collect();
        assert_eq!(price_report(&records).median, Some(2.0));
    }

    #[test]
    fn test_price_excludes_zero_and_missing() {
        let records = vec![priced(Some(0.0)), priced(None), priced(Some(12.0))];
        let report = price_report(&records);
        assert_eq!(report.count, 1);
        assert_eq!(report.buckets.iter().map(|b| b.count).sum::<usize>(), 1);
    }

    #[test]
    fn test_price_report_empty() {
        let report = price_report(&[priced(None)]);
        assert_eq!(report.count, 0);
        assert!(report.mean.is_none());
        assert!(report.median.is_none());
        assert_eq!(counts(&report.buckets), vec![0, 0, 0, 0]);
        assert!(report.buckets.iter().all(|b| b.percent == 0.0));
    }

    #[test]
    fn test_runtime_report() {
        let records = vec![
            timed(Some(600)),
            timed(Some(1800)),
            timed(Some(3600)),
            timed(Some(7200)),
            timed(Some(0)),
            timed(None),
        ];
        let report = runtime_report(&records);

        assert_eq!(report.count, 4);
        assert_eq!(counts(&report.buckets), vec![1, 1, 1, 1]);
        assert_eq!(report.total_hours, 13200.0 / 3600.0);
        assert_eq!(report.mean_minutes, Some(13200.0 / 4.0 / 60.0));
    }

    #[test]
    fn test_runtime_report_empty() {
        let report = runtime_report(&[]);
        assert_eq!(report.count, 0);
        assert!(report.mean_minutes.is_none());
        assert_eq!(report.total_hours, 0.0);
    }

    #[test]
    fn test_category_ties_keep_first_seen_order() {
        let mut a = CatalogRecord::titled("A");
        a.content_type = vec!["Stories".into(), "Music".into()];
        let mut b = CatalogRecord::titled("B");
        b.content_type = vec!["Sleep".into(), "Music".into()];
        let mut c = CatalogRecord::titled("C");
        c.content_type = vec!["Sleep".into(), "Stories".into(), "Learning".into()];

        let report = category_report(&[a, b, c], CategoryField::ContentType, 15);
        let labels: Vec<_> = report.entries.iter().map(|e| e.label.as_str()).collect();

        assert_eq!(report.distinct, 4);
        assert_eq!(labels, vec!["Stories", "Music", "Sleep", "Learning"]);
        assert_eq!(report.entries[0].count, 2);
    }

    #[test]
    fn test_category_top_n() {
        let mut a = CatalogRecord::titled("A");
        a.languages = vec!["en".into(), "fr".into(), "de".into()];
        let mut b = CatalogRecord::titled("B");
        b.languages = vec!["de".into()];

        let report = category_report(&[a, b], CategoryField::Language, 2);
        let labels: Vec<_> = report.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["de", "en"]);
        assert_eq!(report.distinct, 3);
        assert_eq!(report.entries[0].percent, 100.0);
    }

    #[test]
    fn test_author_report_skips_unknown() {
        let mut a = CatalogRecord::titled("A");
        a.author = "Julia Donaldson".into();
        let b = CatalogRecord::titled("B");
        let mut c = CatalogRecord::titled("C");
        c.author = String::new();

        let report = category_report(&[a, b, c], CategoryField::Author, 15);
        assert_eq!(report.distinct, 1);
        assert_eq!(report.entries[0].label, "Julia Donaldson");
    }
}

// ============================================================
// Topics-over-time Table
// ============================================================
// Pivots BERTopic's topics_over_time export
//
//   Topic,Words,Frequency,Timestamp
//   0,"battery, cell",12,2019
//   1,"motor, rotor",3,2019
//   0,"battery, anode",20,2020
//
// into a Year × Topic matrix of document counts:
//
//   Year | Batteries | Topic_1
//   2019 |        12 |       3
//   2020 |        20 |       0
//
// Duplicate (year, topic) rows are averaged and truncated to an
// integer; missing cells are 0. Topic -1 (outliers) is dropped
// unless asked otherwise. Years sort numerically when every
// timestamp is an integer, else as text.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::{fs, path::Path};

use crate::report::{html, ReportError};

pub const DEFAULT_TABLE_FILE: &str = "topics_over_time_value.html";
pub const DEFAULT_TITLE: &str = "Documents per topic per year";

const OUTLIER_TOPIC: i64 = -1;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopicFrequency {
    #[serde(rename = "Topic")]
    pub topic: i64,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Frequency")]
    pub frequency: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicTable {
    pub years:  Vec<String>,
    pub topics: Vec<i64>,
    /// cells[row][col] = count of topics[col] in years[row]
    pub cells:  Vec<Vec<i64>>,
}

/// Numeric order when every timestamp parses as an integer, else lexical.
fn sort_years(years: BTreeSet<String>) -> Vec<String> {
    let mut years: Vec<String> = years.into_iter().collect();
    let numeric: Option<Vec<i64>> = years.iter().map(|y| y.trim().parse().ok()).collect();
    if let Some(keys) = numeric {
        let mut keyed: Vec<(i64, String)> = keys.into_iter().zip(years).collect();
        keyed.sort();
        years = keyed.into_iter().map(|(_, y)| y).collect();
    }
    years
}

impl TopicTable {
    pub fn pivot(rows: &[TopicFrequency], remove_outliers: bool) -> Self {
        let mut sums: BTreeMap<(String, i64), (f64, usize)> = BTreeMap::new();
        let mut years  = BTreeSet::new();
        let mut topics = BTreeSet::new();

        for r in rows {
            if remove_outliers && r.topic == OUTLIER_TOPIC {
                continue;
            }
            years.insert(r.timestamp.clone());
            topics.insert(r.topic);
            let cell = sums.entry((r.timestamp.clone(), r.topic)).or_insert((0.0, 0));
            cell.0 += r.frequency;
            cell.1 += 1;
        }

        let years  = sort_years(years);
        let topics: Vec<i64>   = topics.into_iter().collect();
        let cells = years
            .iter()
            .map(|y| {
                topics
                    .iter()
                    .map(|&t| match sums.get(&(y.clone(), t)) {
                        Some(&(sum, n)) => (sum / n as f64).trunc() as i64,
                        None => 0,
                    })
                    .collect()
            })
            .collect();

        Self { years, topics, cells }
    }

    /// Column headers: the custom label, or Topic_<id> when there is none
    pub fn headers(&self, labels: &HashMap<i64, String>) -> Vec<String> {
        std::iter::once("Year".to_string())
            .chain(self.topics.iter().map(|t| {
                labels.get(t).cloned().unwrap_or_else(|| format!("Topic_{t}"))
            }))
            .collect()
    }

    pub fn render(&self, labels: &HashMap<i64, String>, title: &str, generated_at: &str) -> String {
        let rows: Vec<Vec<String>> = self
            .years
            .iter()
            .zip(&self.cells)
            .map(|(y, counts)| {
                std::iter::once(y.clone())
                    .chain(counts.iter().map(i64::to_string))
                    .collect()
            })
            .collect();

        let body = html::table("topic-table", &self.headers(labels), &rows, |_, _| None);
        html::page(title, &body, generated_at)
    }
}

pub fn read_frequencies(path: &Path) -> Result<Vec<TopicFrequency>, ReportError> {
    let csv_err = |source| ReportError::Csv { path: path.to_path_buf(), source };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    reader
        .deserialize()
        .collect::<Result<Vec<TopicFrequency>, _>>()
        .map_err(csv_err)
}

/// Label file: a JSON object mapping topic id (as a string key) to label.
pub fn read_labels(path: &Path) -> Result<HashMap<i64, String>, ReportError> {
    let raw = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    let by_key: HashMap<i64, String> = serde_json::from_str(&raw)
        .map_err(|source| ReportError::Json { path: path.to_path_buf(), source })?;
    Ok(by_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(topic: i64, year: &str, frequency: f64) -> TopicFrequency {
        TopicFrequency { topic, timestamp: year.to_string(), frequency }
    }

    #[test]
    fn test_pivot_fills_missing_and_drops_outliers() {
        let rows = vec![
            row(1, "2020", 4.0),
            row(0, "2019", 12.0),
            row(-1, "2019", 99.0),
            row(0, "2020", 20.0),
        ];
        let t = TopicTable::pivot(&rows, true);

        assert_eq!(t.years, vec!["2019", "2020"]);
        assert_eq!(t.topics, vec![0, 1]);
        assert_eq!(t.cells, vec![vec![12, 0], vec![20, 4]]);
    }

    #[test]
    fn test_integer_years_sort_numerically() {
        let t = TopicTable::pivot(&[row(0, "2019", 1.0), row(0, "999", 2.0)], true);
        assert_eq!(t.years, vec!["999", "2019"]);
        assert_eq!(t.cells, vec![vec![2], vec![1]]);
    }

    #[test]
    fn test_non_numeric_timestamps_sort_as_text() {
        let t = TopicTable::pivot(&[row(0, "2020-01", 1.0), row(0, "2019-12", 1.0)], true);
        assert_eq!(t.years, vec!["2019-12", "2020-01"]);
    }

    #[test]
    fn test_outliers_can_be_kept() {
        let t = TopicTable::pivot(&[row(-1, "2019", 5.0), row(2, "2019", 1.0)], false);
        assert_eq!(t.topics, vec![-1, 2]);
        assert_eq!(t.cells, vec![vec![5, 1]]);
    }

    #[test]
    fn test_duplicate_cells_are_averaged_and_truncated() {
        let t = TopicTable::pivot(&[row(0, "2019", 3.0), row(0, "2019", 4.0)], true);
        assert_eq!(t.cells, vec![vec![3]]);
    }

    #[test]
    fn test_headers_fall_back_to_topic_ids() {
        let t = TopicTable::pivot(&[row(0, "2019", 1.0), row(7, "2019", 1.0)], true);
        let labels = HashMap::from([(0, "Batteries".to_string())]);
        assert_eq!(t.headers(&labels), vec!["Year", "Batteries", "Topic_7"]);
    }

    #[test]
    fn test_reads_bertopic_export_and_labels() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("tot.csv");
        fs::write(
            &csv_path,
            "Topic,Words,Frequency,Timestamp\n0,\"battery, cell\",12,2019\n1,\"motor, rotor\",3,2019\n",
        )
        .unwrap();
        let labels_path = dir.path().join("labels.json");
        fs::write(&labels_path, r#"{"0": "Batteries", "1": "Motors"}"#).unwrap();

        let rows   = read_frequencies(&csv_path).unwrap();
        let labels = read_labels(&labels_path).unwrap();
        let page   = TopicTable::pivot(&rows, true).render(&labels, DEFAULT_TITLE, "now");

        assert_eq!(rows.len(), 2);
        assert!(page.contains("<th>Batteries</th><th>Motors</th>"));
        assert!(page.contains("<tr><td>2019</td><td>12</td><td>3</td></tr>"));
    }
}

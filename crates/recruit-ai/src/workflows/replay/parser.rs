use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One recorded candidate card, in list order.
#[derive(Debug, Clone)]
pub(crate) struct ReplayRecord {
    pub(crate) job_title: Option<String>,
    pub(crate) seen: bool,
    pub(crate) age: Option<u32>,
    pub(crate) card_text: String,
    pub(crate) detail_text: String,
    pub(crate) image_path: Option<String>,
    pub(crate) outreach_blocked: bool,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ReplayRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<ReplayRow>() {
        let row = record?;
        let detail_text = row.detail_text.unwrap_or_else(|| row.card_text.clone());

        records.push(ReplayRecord {
            job_title: row.job_title,
            seen: row.seen.as_deref().is_some_and(truthy),
            age: row.age.as_deref().and_then(|age| age.parse().ok()),
            card_text: row.card_text,
            detail_text,
            image_path: row.image_path,
            outreach_blocked: row.outreach_blocked.as_deref().is_some_and(truthy),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ReplayRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    job_title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    seen: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age: Option<String>,
    card_text: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    detail_text: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    image_path: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    outreach_blocked: Option<String>,
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y"
    )
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_columns_may_be_blank_or_missing() {
        let csv = "seen,age,card_text\n\
                   ,28,10-15K 张三 28岁 本科\n\
                   true,,面议 李四\n";
        let records = parse_records(csv.as_bytes()).expect("csv parses");

        assert_eq!(records.len(), 2);
        assert!(!records[0].seen);
        assert_eq!(records[0].age, Some(28));
        assert_eq!(records[0].detail_text, records[0].card_text);
        assert!(records[1].seen);
        assert_eq!(records[1].age, None);
        assert_eq!(records[1].job_title, None);
        assert!(!records[1].outreach_blocked);
    }
}

use rental::Summaries;

/// One line of the breakdown table, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    pub group: String,
    pub key: String,
    pub rentals: String,
    pub share: String,
}

impl Data {
    pub const fn ref_array(&self) -> [&String; 4] {
        [&self.group, &self.key, &self.rentals, &self.share]
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn rentals(&self) -> &str {
        &self.rentals
    }

    pub fn share(&self) -> &str {
        &self.share
    }
}

fn share(value: u64, total: u64) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", value as f64 * 100.0 / total as f64)
}

/// Flatten the season and categorical tables into table rows.
pub fn generate_data_vec(summaries: &Summaries) -> Vec<Data> {
    let total = summaries.headline.total;
    let mut rows = vec![];
    for (season, split) in summaries.season.rows() {
        rows.push(Data {
            group: "season".to_string(),
            key: season.clone(),
            rentals: split.total().to_string(),
            share: share(split.total(), total),
        });
    }
    for (group, table) in summaries.categories() {
        for (key, value) in table.rows() {
            rows.push(Data {
                group: group.to_string(),
                key: key.clone(),
                rentals: value.to_string(),
                share: share(*value, total),
            });
        }
    }
    rows
}

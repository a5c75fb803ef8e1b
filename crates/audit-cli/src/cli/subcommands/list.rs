use clap::Args;

use audit_core::query::QueryParams;

/// Query surface shared by every listing.
#[derive(Clone, Debug, Default, Args)]
pub struct ListArgs {
    /// Start of the date range (inclusive, `YYYY-MM-DD` or RFC 3339).
    #[arg(long)]
    pub date_from: Option<String>,

    /// End of the date range (inclusive).
    #[arg(long)]
    pub date_to: Option<String>,

    /// Substring matched against the kind's keyword fields.
    #[arg(long)]
    pub keyword: Option<String>,

    /// Exact-match field filter; repeatable.
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub offset: Option<u32>,
}

impl ListArgs {
    /// Flatten the flags into the listing query parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params: QueryParams = self.filters.iter().cloned().collect();
        let named = [
            ("date_from", self.date_from.clone()),
            ("date_to", self.date_to.clone()),
            ("keyword", self.keyword.clone()),
            ("limit", self.limit.map(|v| v.to_string())),
            ("offset", self.offset.map(|v| v.to_string())),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                params.insert(key, value);
            }
        }
        params
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    QueryParams::parse_pair(raw).ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

/// Input for `record` subcommands.
#[derive(Clone, Debug, Default, Args)]
pub struct RecordArgs {
    /// JSON payload. Read from stdin when omitted or `-`.
    #[arg(long)]
    pub json: Option<String>,
}

use chrono::{DateTime, Utc};
use usage_monitor_core::types::{UsageRecord, UsageResponse};

use super::{escape_html, layout};

/// Dashboard page for one usage response.
///
/// Records are sorted by account name here; the aggregator leaves order open.
pub fn render_dashboard(response: &UsageResponse, generated_at: DateTime<Utc>) -> String {
    let source = if response.cached {
        r#"<span class="badge">cached</span>"#
    } else {
        r#"<span class="badge">live</span>"#
    };
    let header = format!(
        r#"<header>
<div><h1>Usage Monitor</h1><div class="muted">Pages Functions + Workers requests today (UTC) · {time} {source}</div></div>
<div class="actions"><a href="/?refresh=1">Refresh</a> <form method="post" action="/logout" style="display:inline"><button type="submit">Log out</button></form></div>
</header>
"#,
        time = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );

    let content = if !response.success {
        let message = response.error.as_deref().unwrap_or("Unknown error");
        format!(
            r#"<div class="card failed"><p class="error">{}</p></div>"#,
            escape_html(message)
        )
    } else if response.accounts.is_empty() {
        r#"<div class="card"><p class="muted">No accounts found.</p></div>"#.to_string()
    } else {
        let mut records: Vec<&UsageRecord> = response.accounts.iter().collect();
        records.sort_by(|a, b| a.account_name.cmp(&b.account_name));
        records.into_iter().map(render_record).collect()
    };

    layout("Usage Monitor", &format!("<main>\n{header}{content}</main>"))
}

fn render_record(record: &UsageRecord) -> String {
    let name = escape_html(&record.account_name);

    if let Some(error) = &record.error {
        return format!(
            r#"<div class="card failed"><h2>{name}</h2><p class="error">Failed to load usage: {}</p></div>"#,
            escape_html(error)
        );
    }

    let percent = record.usage_percent();
    let level = if percent >= 90.0 {
        "high"
    } else if percent >= 70.0 {
        "warn"
    } else {
        ""
    };
    format!(
        r#"<div class="card"><h2>{name}</h2>
<div class="stats">
<div>Pages<b>{pages}</b></div>
<div>Workers<b>{workers}</b></div>
<div>Total<b>{total}</b></div>
<div>Free remaining<b>{remaining}</b></div>
</div>
<div class="bar" title="{percent:.1}%"><span class="{level}" style="width:{percent:.1}%"></span></div>
<div class="muted">{percent:.1}% of daily free quota used</div>
</div>
"#,
        pages = record.pages,
        workers = record.workers,
        total = record.total,
        remaining = record.free_quota_remaining,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use usage_monitor_core::types::{
        AggregationResult, FREE_LIMIT, ProviderAccount, UsageCounts,
    };

    fn record(id: &str, name: &str, pages: u64, workers: u64) -> UsageRecord {
        UsageRecord::new(
            &ProviderAccount {
                id: id.to_string(),
                name: name.to_string(),
            },
            UsageCounts::new(pages, workers),
            FREE_LIMIT,
        )
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn shows_counts_and_percentage() {
        let response = UsageResponse::from_result(
            AggregationResult::success(vec![record("a1", "Alpha", 20_000, 5_000)]),
            false,
        );
        let page = render_dashboard(&response, at());

        assert!(page.contains("Alpha"));
        assert!(page.contains("<b>25000</b>"));
        assert!(page.contains("<b>75000</b>"));
        assert!(page.contains("width:25.0%"));
        assert!(page.contains("2024-03-15 12:00:00 UTC"));
        assert!(page.contains(">live<"));
    }

    #[test]
    fn records_sorted_by_name() {
        let response = UsageResponse::from_result(
            AggregationResult::success(vec![
                record("z", "Zulu", 1, 1),
                record("a", "Alpha", 1, 1),
            ]),
            true,
        );
        let page = render_dashboard(&response, at());

        let alpha = page.find("Alpha").unwrap();
        let zulu = page.find("Zulu").unwrap();
        assert!(alpha < zulu);
        assert!(page.contains(">cached<"));
    }

    #[test]
    fn failed_record_and_names_are_escaped() {
        let account = ProviderAccount {
            id: "a1".to_string(),
            name: "<script>".to_string(),
        };
        let response = UsageResponse::from_result(
            AggregationResult::success(vec![UsageRecord::failed(
                &account,
                "HTTP 503 <gateway>",
                FREE_LIMIT,
            )]),
            false,
        );
        let page = render_dashboard(&response, at());

        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("Failed to load usage: HTTP 503 &lt;gateway&gt;"));
    }

    #[test]
    fn whole_failure_shows_error() {
        let page = render_dashboard(&UsageResponse::failure("No API tokens configured"), at());
        assert!(page.contains("No API tokens configured"));
        assert!(!page.contains(r#"class="stats""#));
    }

    #[test]
    fn high_usage_bar_is_flagged() {
        let response = UsageResponse::from_result(
            AggregationResult::success(vec![record("a1", "Busy", 95_000, 0)]),
            false,
        );
        assert!(render_dashboard(&response, at()).contains(r#"class="high""#));
    }

    #[test]
    fn has_refresh_and_logout_controls() {
        let page = render_dashboard(&UsageResponse::failure("x"), at());
        assert!(page.contains(r#"href="/?refresh=1""#));
        assert!(page.contains(r#"action="/logout""#));
    }

    #[test]
    fn empty_success_shows_placeholder_inside_main() {
        let response = UsageResponse::from_result(AggregationResult::success(Vec::new()), false);
        let page = render_dashboard(&response, at());

        let main_start = page.find("<main>").unwrap();
        let placeholder = page.find("No accounts found.").unwrap();
        let main_end = page.find("</main>").unwrap();
        assert!(main_start < placeholder && placeholder < main_end);
    }
}

// SPDX-License-Identifier: Apache-2.0

use causeway_client::{FeedPaginator, FetchOutcome, HttpTransport};
use std::sync::Arc;

/// Follows the feed from the newest entry to exhaustion, printing one line
/// per entry. Exercises the same pagination client the app surfaces use.
pub async fn run(url: &str, limit: usize) -> Result<(), String> {
    let transport = Arc::new(HttpTransport::new(url));
    let paginator = FeedPaginator::new(transport, limit);

    if paginator.load_initial().await == FetchOutcome::Failed {
        let view = paginator.view().await;
        return Err(view
            .error
            .unwrap_or_else(|| "initial feed load failed".to_string()));
    }

    let mut printed = 0;
    loop {
        let view = paginator.view().await;
        for item in view.items.iter().skip(printed) {
            let opportunity = item
                .opportunity
                .as_ref()
                .map(|o| format!("  [{}]", o.title))
                .unwrap_or_default();
            println!(
                "{}  {:<24}  {}{}",
                item.created_at, item.organization.name, item.title, opportunity
            );
        }
        printed = view.items.len();
        if !view.has_next_page {
            break;
        }
        if paginator.fetch_next_page().await == FetchOutcome::Failed {
            let view = paginator.view().await;
            return Err(view
                .error
                .unwrap_or_else(|| "feed page fetch failed".to_string()));
        }
    }
    println!("-- {printed} entries");
    Ok(())
}

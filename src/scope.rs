use crate::models::ScopeSelector;
use crate::source::RecordSource;

/// Resolves the requested campaign id into the scope every builder uses.
///
/// Fails open: an absent or unknown id, or a failed existence probe, all
/// resolve to [`ScopeSelector::All`].
pub async fn resolve_scope<S: RecordSource>(source: &mut S, requested: Option<&str>) -> ScopeSelector {
    let campaign_id = match requested {
        Some(id) if !id.is_empty() && id != "All" => id,
        _ => return ScopeSelector::All,
    };

    match source.campaign_exists(campaign_id).await {
        Ok(true) => ScopeSelector::Campaign(campaign_id.to_string()),
        Ok(false) => {
            tracing::info!(campaign_id, "unknown campaign id, aggregating all campaigns");
            ScopeSelector::All
        }
        Err(error) => {
            tracing::warn!(campaign_id, error = %error, "campaign lookup failed, aggregating all campaigns");
            ScopeSelector::All
        }
    }
}

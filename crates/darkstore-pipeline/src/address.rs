//! The address-resolution state machine.
//!
//! A strictly sequential sequence of stages, each gated on a wait: open the
//! address prompt, type a city, pick a city suggestion, type a street, pick
//! an address suggestion, submit. Every stage failure is fatal to the run —
//! no address means nothing downstream is worth crawling.
//!
//! Stage transitions wait on explicit page conditions (panel visible, second
//! input region rendered, suggestion list populated) rather than fixed
//! sleeps. The one residual unconditional delay is `typing_settle` after
//! keystrokes: the suggestion inputs are debounced, and a freshly typed query
//! cannot be told apart from the previous one by inspecting the list.

use tokio_util::sync::CancellationToken;

use crate::error::CrawlError;
use crate::selectors;
use crate::source::{validate_ordinal, ElementSource, SelectionProvider};
use crate::wait::{wait_for_visible, wait_until, WaitPolicy};

/// Drives the address-selection UI to completion on the entry page.
///
/// # Errors
///
/// Any stage that cannot locate its element, times out, enumerates zero
/// candidates, or receives an out-of-range ordinal fails the whole
/// resolution. [`CrawlError::Cancelled`] is returned as soon as `cancel`
/// fires.
pub async fn resolve_address<S, P>(
    source: &S,
    selections: &mut P,
    policy: &WaitPolicy,
    cancel: &CancellationToken,
) -> Result<(), CrawlError>
where
    S: ElementSource,
    P: SelectionProvider,
{
    wait_for_visible(
        source,
        selectors::SIDEBAR,
        policy.sidebar_timeout,
        policy.poll_interval,
        cancel,
    )
    .await?;

    let plug = source.find(selectors::EMPTY_ADDRESS_PLUG).await?;
    source.click(&plug).await?;

    wait_for_visible(
        source,
        selectors::SUGGEST_PANEL,
        policy.suggest_timeout,
        policy.poll_interval,
        cancel,
    )
    .await?;

    let form = source.find(selectors::ADDRESS_FORM).await?;

    let city_container = source
        .find_descendant(&form, selectors::CITY_INPUT_CONTAINER)
        .await?;
    let city_input = source
        .find_descendant(&city_container, selectors::INPUT)
        .await?;
    // The field is sometimes prefilled with a default city.
    source.clear(&city_input).await?;

    let city_query = selections.input_city_query()?;
    source.type_text(&city_input, &city_query).await?;
    tokio::time::sleep(policy.typing_settle).await;

    wait_for_city_suggestions(source, policy, cancel).await?;

    let panel = source.find(selectors::SUGGEST_PANEL).await?;
    let cities = source
        .find_descendants(&panel, selectors::SUGGEST_ITEM)
        .await?;
    if cities.is_empty() {
        return Err(CrawlError::NoCandidates {
            what: "city".to_string(),
        });
    }
    let mut city_labels = Vec::with_capacity(cities.len());
    for city in &cities {
        city_labels.push(source.text(city).await?);
    }
    let ordinal = selections.choose_city(&city_labels)?;
    let index = validate_ordinal(ordinal, city_labels.len())?;
    source.click(&cities[index]).await?;
    tracing::info!(city = %city_labels[index], "city selected");

    // Picking a city re-renders the form with a second suggestion region
    // holding the street input.
    wait_until(
        "street input region",
        policy.suggest_timeout,
        policy.poll_interval,
        cancel,
        move || async move {
            let form = source.find(selectors::ADDRESS_FORM).await?;
            let regions = source
                .find_descendants(&form, selectors::SUGGEST_REGION)
                .await?;
            Ok(regions.len() >= 2)
        },
    )
    .await?;

    let form = source.find(selectors::ADDRESS_FORM).await?;
    let regions = source
        .find_descendants(&form, selectors::SUGGEST_REGION)
        .await?;
    let street_region = regions.get(1).ok_or_else(|| CrawlError::NotFound {
        selector: selectors::SUGGEST_REGION.to_string(),
    })?;
    let street_input = source
        .find_descendant(street_region, selectors::INPUT)
        .await?;

    let street_query = selections.input_street_query()?;
    source.type_text(&street_input, &street_query).await?;
    tokio::time::sleep(policy.typing_settle).await;

    wait_until(
        "address suggestions",
        policy.suggest_timeout,
        policy.poll_interval,
        cancel,
        move || async move {
            let items = source
                .find_descendants(street_region, selectors::SUGGEST_ITEM)
                .await?;
            Ok(!items.is_empty())
        },
    )
    .await?;

    let addresses = source
        .find_descendants(street_region, selectors::SUGGEST_ITEM)
        .await?;
    if addresses.is_empty() {
        return Err(CrawlError::NoCandidates {
            what: "address".to_string(),
        });
    }
    let mut address_labels = Vec::with_capacity(addresses.len());
    for address in &addresses {
        // The first inner span carries the street name; the rest is
        // secondary detail.
        let spans = source.find_descendants(address, selectors::SPAN).await?;
        let title = spans.first().ok_or_else(|| CrawlError::NotFound {
            selector: selectors::SPAN.to_string(),
        })?;
        address_labels.push(source.text(title).await?);
    }
    let ordinal = selections.choose_address(&address_labels)?;
    let index = validate_ordinal(ordinal, address_labels.len())?;
    source.click(&addresses[index]).await?;
    tracing::info!(address = %address_labels[index], "address selected");

    wait_for_visible(
        source,
        selectors::ADDRESS_INFO,
        policy.suggest_timeout,
        policy.poll_interval,
        cancel,
    )
    .await?;

    let info = source.find(selectors::ADDRESS_INFO).await?;
    let submit = source.find_descendant(&info, selectors::BUTTON).await?;
    source.click(&submit).await?;
    tracing::info!("address submitted");

    Ok(())
}

/// Waits for the suggestion panel after a city query.
///
/// The panel wait uses the shorter city-suggestion timeout; if it expires
/// but suggestion items are already present (the panel can stay hidden when
/// results arrived before the query settled), resolution proceeds — the
/// candidate enumeration that follows is the authoritative check.
async fn wait_for_city_suggestions<S: ElementSource>(
    source: &S,
    policy: &WaitPolicy,
    cancel: &CancellationToken,
) -> Result<(), CrawlError> {
    let wait = wait_for_visible(
        source,
        selectors::SUGGEST_PANEL,
        policy.city_suggest_timeout,
        policy.poll_interval,
        cancel,
    )
    .await;

    if let Err(wait_err) = wait {
        if matches!(wait_err, CrawlError::Cancelled) {
            return Err(wait_err);
        }
        let present = match source.find(selectors::SUGGEST_PANEL).await {
            Ok(panel) => source
                .find_descendants(&panel, selectors::SUGGEST_ITEM)
                .await
                .is_ok_and(|items| !items.is_empty()),
            Err(_) => false,
        };
        if !present {
            return Err(wait_err);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "address_test.rs"]
mod tests;

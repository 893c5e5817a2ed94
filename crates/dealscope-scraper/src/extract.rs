//! The generalized extraction engine.
//!
//! One algorithm drives every site, specialized by the selector tables in
//! [`crate::sites`]: navigate, settle, dismiss interstitials, scroll for
//! lazy content, discover listing containers through an ordered selector
//! fallback (with a structural last resort), then pull each field through
//! its own fallback chain. Field- and container-level failures are local:
//! a broken selector skips that field or container, never the site pass.

use async_trait::async_trait;
use regex::Regex;

use dealscope_core::{ProductRecord, Source};

use crate::category::categorize;
use crate::driver::{BrowserSession, Element};
use crate::error::ScrapeError;
use crate::normalize::{detect_offers, has_price_token, join_offers, parse_price};
use crate::relevance::is_relevant;
use crate::selectors::{Extract, FieldPlan};
use crate::sites::{LinkPlan, PopupProbe, ScrollPlan, SiteProfile, StructuralFallback};
use crate::wait::settle;

/// Minimum plausible length of a real image URL; shorter values are
/// data-URI stubs or empty-src placeholders.
const MIN_IMAGE_URL_LEN: usize = 21;

/// A site-specific extraction strategy.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    fn source(&self) -> Source;

    /// Extracts all accepted listings for `query` from this site.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Adapter`] when the site cannot be reached at
    /// all; anything less than that degrades to fewer records instead.
    async fn extract(
        &self,
        session: &dyn BrowserSession,
        query: &str,
    ) -> Result<Vec<ProductRecord>, ScrapeError>;
}

/// [`SiteAdapter`] implementation driven entirely by a [`SiteProfile`].
pub struct ProfileAdapter {
    profile: SiteProfile,
}

impl ProfileAdapter {
    #[must_use]
    pub fn new(profile: SiteProfile) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl SiteAdapter for ProfileAdapter {
    fn source(&self) -> Source {
        self.profile.source
    }

    async fn extract(
        &self,
        session: &dyn BrowserSession,
        query: &str,
    ) -> Result<Vec<ProductRecord>, ScrapeError> {
        let profile = &self.profile;
        let search_url = (profile.search_url)(query);

        tracing::info!(site = %profile.source, url = %search_url, "loading search results");
        session
            .navigate(&search_url)
            .await
            .map_err(|error| ScrapeError::Adapter {
                site: profile.source,
                error,
            })?;

        settle(profile.settle).await;

        if let Some(popup) = &profile.popup {
            dismiss_popup(session, popup).await;
        }

        scroll_for_lazy_content(session, &profile.scroll).await;

        let containers = discover_containers(session, profile).await;
        tracing::debug!(
            site = %profile.source,
            containers = containers.len(),
            "container discovery finished"
        );

        let mut records = Vec::new();
        for container in containers.iter().take(profile.max_containers) {
            if let Some(record) =
                build_record(container.as_ref(), profile, query, &search_url).await
            {
                records.push(record);
            }
        }

        tracing::info!(
            site = %profile.source,
            accepted = records.len(),
            "site pass complete"
        );
        Ok(records)
    }
}

/// Bounded wait-for-clickable probe for a transient interstitial. Absence
/// of the prompt is the common case and not an error.
async fn dismiss_popup(session: &dyn BrowserSession, probe: &PopupProbe) {
    for _ in 0..probe.attempts {
        for selector in probe.selectors {
            match session.find(selector).await {
                Ok(Some(button)) => {
                    if button.click().await.is_ok() {
                        tracing::debug!(selector, "dismissed interstitial");
                        tokio::time::sleep(std::time::Duration::from_millis(probe.pause_ms)).await;
                        return;
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::trace!(selector, %error, "popup probe failed");
                }
            }
        }
        tokio::time::sleep(std::time::Duration::from_millis(probe.pause_ms)).await;
    }
}

/// Runs the profile's scroll-and-wait cycles to trigger lazy loading.
async fn scroll_for_lazy_content(session: &dyn BrowserSession, plan: &ScrollPlan) {
    for _ in 0..plan.cycles {
        if let Err(error) = session.scroll_by(plan.step_px).await {
            tracing::debug!(%error, "scroll failed");
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(plan.pause_ms)).await;
    }
    if plan.return_to_top {
        let total = plan.step_px.saturating_mul(i64::from(plan.cycles));
        if session.scroll_by(-total).await.is_ok() {
            tokio::time::sleep(std::time::Duration::from_millis(plan.pause_ms)).await;
        }
    }
}

/// Tries the ordered container selectors, accepting the first candidate
/// that yields at least the profile's minimum count; falls back to a
/// structural scan when every candidate misses.
async fn discover_containers(
    session: &dyn BrowserSession,
    profile: &SiteProfile,
) -> Vec<Box<dyn Element>> {
    for selector in profile.container_selectors {
        match session.find_all(selector).await {
            Ok(found) if found.len() >= profile.min_containers => {
                tracing::debug!(
                    site = %profile.source,
                    selector,
                    count = found.len(),
                    "containers matched"
                );
                return found;
            }
            Ok(found) => {
                tracing::trace!(selector, count = found.len(), "below minimum, trying next");
            }
            Err(error) => {
                tracing::debug!(selector, %error, "container selector failed");
            }
        }
    }

    if let Some(fallback) = &profile.fallback {
        return structural_scan(session, fallback, profile).await;
    }
    Vec::new()
}

/// Last-resort discovery: any probed element holding both an image and
/// price-shaped text is treated as a listing container.
async fn structural_scan(
    session: &dyn BrowserSession,
    fallback: &StructuralFallback,
    profile: &SiteProfile,
) -> Vec<Box<dyn Element>> {
    let Ok(candidates) = session.find_all(fallback.probe_selector).await else {
        return Vec::new();
    };

    let mut containers = Vec::new();
    for element in candidates.into_iter().take(fallback.max_probe) {
        let has_image = matches!(element.find("img").await, Ok(Some(_)));
        if !has_image {
            continue;
        }
        let text = element.text().await.unwrap_or_default();
        if has_price_token(&text) {
            containers.push(element);
            if containers.len() == profile.max_containers {
                break;
            }
        }
    }

    if containers.len() >= profile.min_containers {
        tracing::debug!(
            site = %profile.source,
            count = containers.len(),
            "structural fallback matched containers"
        );
        containers
    } else {
        Vec::new()
    }
}

/// Evaluates a field's fallback chain against one container: first
/// candidate producing an acceptable value wins, every failure is a miss.
async fn eval_field(container: &dyn Element, plan: &FieldPlan) -> Option<String> {
    for candidate in plan.candidates {
        let Ok(Some(element)) = container.find(candidate.selector).await else {
            continue;
        };
        let value = match candidate.extract {
            Extract::Text => element.text().await.ok(),
            Extract::Attribute(name) => element.attribute(name).await.ok().flatten(),
            Extract::TextOrAttribute(name) => match element.text().await {
                Ok(text) if !text.trim().is_empty() => Some(text),
                _ => element.attribute(name).await.ok().flatten(),
            },
        };
        if let Some(value) = value {
            let value = value.trim().to_owned();
            if plan.accept.allows(&value) {
                return Some(value);
            }
            tracing::trace!(
                field = plan.field,
                selector = candidate.selector,
                "value rejected by accept predicate"
            );
        }
    }
    None
}

/// Derives the product-specific URL for a container, `None` when nothing
/// identifiable is found.
async fn derive_product_url(
    container: &dyn Element,
    plan: &LinkPlan,
    base_url: &str,
    search_url: &str,
) -> Option<String> {
    // A product id on the container itself beats scanning links.
    if let Some(id_spec) = plan.container_id {
        if let Ok(Some(id)) = container.attribute(id_spec.attribute).await {
            let id = id.trim();
            let len_ok = id_spec.exact_len.is_none_or(|n| id.len() == n);
            let shape_ok =
                !id_spec.alphanumeric || id.chars().all(|c| c.is_ascii_alphanumeric());
            if !id.is_empty() && len_ok && shape_ok {
                if let Some(canonical) = plan.canonical {
                    return Some(canonical(id));
                }
            }
        }
    }

    if let Ok(links) = container.find_all("a").await {
        for link in links {
            let Ok(Some(href)) = link.attribute("href").await else {
                continue;
            };
            let href = href.trim();
            if href.is_empty() || href == search_url {
                continue;
            }
            let href_lower = href.to_lowercase();
            if !plan.href_patterns.iter().any(|p| href_lower.contains(p)) {
                continue;
            }
            if let (Some(pattern), Some(canonical)) = (plan.id_pattern, plan.canonical) {
                let re = Regex::new(pattern).expect("valid regex");
                if let Some(id) = re.captures(href).and_then(|cap| cap.get(1)) {
                    return Some(canonical(id.as_str()));
                }
                // Pattern substring present but no extractable id; keep scanning.
                continue;
            }
            return Some(absolutize(href, base_url));
        }
    }

    // Some grids hang the product URL off the card wrapper instead of a
    // contained anchor.
    for attr in plan.container_url_attrs {
        if let Ok(Some(href)) = container.attribute(attr).await {
            let href = href.trim();
            if !href.is_empty() {
                return Some(absolutize(href, base_url));
            }
        }
    }
    None
}

/// Builds one record from a container, or `None` when the container is
/// rejected (missing title, irrelevant, no price, or — where required —
/// no product URL). Side-effect-free apart from trace logging.
async fn build_record(
    container: &dyn Element,
    profile: &SiteProfile,
    query: &str,
    search_url: &str,
) -> Option<ProductRecord> {
    let title = eval_field(container, &profile.title).await?;

    if !is_relevant(&title, query) {
        tracing::trace!(site = %profile.source, title = %title, "rejected as irrelevant");
        return None;
    }

    let product_url = derive_product_url(container, &profile.link, profile.base_url, search_url).await;
    if profile.link.require_product_url && product_url.is_none() {
        tracing::trace!(site = %profile.source, title = %title, "no product URL, skipping");
        return None;
    }
    let url = product_url.unwrap_or_else(|| search_url.to_owned());

    // No price text means nothing to compare against other sites.
    let raw_price = eval_field(container, &profile.price).await?;
    let price = parse_price(&raw_price);

    let rating = match &profile.rating {
        Some(plan) => eval_field(container, plan)
            .await
            .unwrap_or_else(|| "N/A".to_owned()),
        None => "N/A".to_owned(),
    };

    let container_text = container.text().await.unwrap_or_default();
    let offers = join_offers(&detect_offers(&container_text));

    let image = match eval_field(container, &profile.image).await {
        Some(src)
            if src.len() >= MIN_IMAGE_URL_LEN && !src.to_lowercase().contains("placeholder") =>
        {
            absolutize(&src, profile.base_url)
        }
        _ => "N/A".to_owned(),
    };

    let category = categorize(&title).to_owned();

    Some(ProductRecord {
        title,
        raw_price,
        price,
        rating,
        category,
        source: profile.source,
        url,
        image,
        offers,
    })
}

/// Resolves a possibly-relative URL against the site origin.
fn absolutize(url: &str, base_url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_owned()
    } else if url.starts_with('/') {
        format!("{base_url}{url}")
    } else {
        format!("{base_url}/{url}")
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;

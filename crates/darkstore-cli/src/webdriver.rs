//! `thirtyfour`-backed implementation of the pipeline's [`ElementSource`].

use std::marker::PhantomData;

use thirtyfour::error::{WebDriverError, WebDriverErrorInner};
use thirtyfour::prelude::*;
use thirtyfour::Proxy;

use darkstore_core::AppConfig;
use darkstore_pipeline::{CrawlError, ElementSource};

/// Handle to one element on the session's current page.
///
/// The phantom lifetime ties the handle to the borrow of the session that
/// produced it, so a handle cannot be used across a navigation — the
/// WebDriver protocol invalidates element references on page load.
#[derive(Clone)]
pub struct PageElement<'a> {
    element: WebElement,
    _page: PhantomData<&'a ()>,
}

/// One WebDriver browser session.
pub struct DriverSource {
    driver: WebDriver,
}

impl DriverSource {
    /// Opens a session against the configured WebDriver endpoint and loads
    /// the storefront entry page.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`WebDriverError`] if the session cannot be
    /// created or the entry page fails to load.
    pub async fn connect(config: &AppConfig) -> Result<Self, WebDriverError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg(&format!("--user-agent={}", config.user_agent))?;
        if let Some(proxy) = &config.proxy_http {
            caps.set_proxy(Proxy::Manual {
                ftp_proxy: None,
                http_proxy: Some(proxy.clone()),
                ssl_proxy: Some(proxy.clone()),
                socks_proxy: None,
                socks_version: None,
                socks_username: None,
                socks_password: None,
                no_proxy: None,
            })?;
        }

        let driver = WebDriver::new(&config.webdriver_url, caps).await?;
        driver.maximize_window().await?;
        driver.goto(&config.start_url).await?;
        Ok(Self { driver })
    }

    /// Ends the browser session.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`WebDriverError`]; the server eventually
    /// reaps abandoned sessions, so callers may log and continue.
    pub async fn quit(self) -> Result<(), WebDriverError> {
        self.driver.quit().await
    }
}

fn lookup_error(selector: &str, err: WebDriverError) -> CrawlError {
    match err.as_inner() {
        WebDriverErrorInner::NoSuchElement(_) => CrawlError::NotFound {
            selector: selector.to_string(),
        },
        _ => CrawlError::Interaction {
            action: format!("lookup of {selector}"),
            reason: err.to_string(),
        },
    }
}

fn interaction_error(action: &str, err: WebDriverError) -> CrawlError {
    CrawlError::Interaction {
        action: action.to_string(),
        reason: err.to_string(),
    }
}

impl ElementSource for DriverSource {
    type Element<'a> = PageElement<'a>;

    async fn find(&self, selector: &str) -> Result<PageElement<'_>, CrawlError> {
        let element = self
            .driver
            .find(By::Css(selector))
            .await
            .map_err(|e| lookup_error(selector, e))?;
        Ok(PageElement {
            element,
            _page: PhantomData,
        })
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<PageElement<'_>>, CrawlError> {
        let elements = self
            .driver
            .find_all(By::Css(selector))
            .await
            .map_err(|e| lookup_error(selector, e))?;
        Ok(elements
            .into_iter()
            .map(|element| PageElement {
                element,
                _page: PhantomData,
            })
            .collect())
    }

    async fn find_descendant<'a>(
        &'a self,
        parent: &PageElement<'a>,
        selector: &str,
    ) -> Result<PageElement<'a>, CrawlError> {
        let element = parent
            .element
            .find(By::Css(selector))
            .await
            .map_err(|e| lookup_error(selector, e))?;
        Ok(PageElement {
            element,
            _page: PhantomData,
        })
    }

    async fn find_descendants<'a>(
        &'a self,
        parent: &PageElement<'a>,
        selector: &str,
    ) -> Result<Vec<PageElement<'a>>, CrawlError> {
        let elements = parent
            .element
            .find_all(By::Css(selector))
            .await
            .map_err(|e| lookup_error(selector, e))?;
        Ok(elements
            .into_iter()
            .map(|element| PageElement {
                element,
                _page: PhantomData,
            })
            .collect())
    }

    async fn text(&self, element: &Self::Element<'_>) -> Result<String, CrawlError> {
        element
            .element
            .text()
            .await
            .map_err(|e| interaction_error("text read", e))
    }

    async fn attribute(
        &self,
        element: &Self::Element<'_>,
        name: &str,
    ) -> Result<Option<String>, CrawlError> {
        element
            .element
            .attr(name)
            .await
            .map_err(|e| interaction_error("attribute read", e))
    }

    async fn is_visible(&self, element: &Self::Element<'_>) -> Result<bool, CrawlError> {
        element
            .element
            .is_displayed()
            .await
            .map_err(|e| interaction_error("visibility check", e))
    }

    async fn click(&self, element: &Self::Element<'_>) -> Result<(), CrawlError> {
        element
            .element
            .click()
            .await
            .map_err(|e| interaction_error("click", e))
    }

    async fn clear(&self, element: &Self::Element<'_>) -> Result<(), CrawlError> {
        element
            .element
            .clear()
            .await
            .map_err(|e| interaction_error("input clear", e))
    }

    async fn type_text(&self, element: &Self::Element<'_>, text: &str) -> Result<(), CrawlError> {
        element
            .element
            .send_keys(text)
            .await
            .map_err(|e| interaction_error("typing", e))
    }

    async fn navigate(&mut self, url: &str) -> Result<(), CrawlError> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| CrawlError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}

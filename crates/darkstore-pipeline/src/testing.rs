//! Deterministic in-memory implementations of the pipeline capabilities.
//!
//! `MockSource` serves a small DOM tree per URL and records every click,
//! keystroke, and navigation so tests can assert on interaction order.
//! Selector support covers what the pipeline uses: a single `.class` or a
//! bare tag name.

use std::cell::RefCell;
use std::collections::HashMap;

use std::time::Duration;

use crate::error::CrawlError;
use crate::source::{ElementSource, SelectionProvider};
use crate::wait::WaitPolicy;

/// Millisecond-scale waits so failing waits do not stall the test run.
pub(crate) fn test_policy() -> WaitPolicy {
    WaitPolicy {
        sidebar_timeout: Duration::from_millis(50),
        suggest_timeout: Duration::from_millis(50),
        city_suggest_timeout: Duration::from_millis(20),
        page_timeout: Duration::from_millis(50),
        poll_interval: Duration::from_millis(1),
        typing_settle: Duration::from_millis(0),
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    tag: String,
    classes: Vec<String>,
    text: String,
    attrs: HashMap<String, String>,
    visible: bool,
    children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            text: String::new(),
            attrs: HashMap::new(),
            visible: true,
            children: Vec::new(),
        }
    }

    /// Adds a class; accepts the selector form (`".Foo"`) or a bare name.
    pub fn class(mut self, class: &str) -> Self {
        self.classes
            .push(class.trim_start_matches('.').to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    fn matches(&self, selector: &str) -> bool {
        selector.strip_prefix('.').map_or_else(
            || self.tag == selector,
            |class| self.classes.iter().any(|c| c == class),
        )
    }

    /// A stable label for interaction logs: `data-test` attr, else text,
    /// else tag.
    fn marker(&self) -> String {
        if let Some(id) = self.attrs.get("data-test") {
            id.clone()
        } else if self.text.is_empty() {
            self.tag.clone()
        } else {
            self.text.clone()
        }
    }
}

/// Handle into the current page's tree: the child-index path from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MockElement {
    path: Vec<usize>,
}

pub(crate) struct MockSource {
    pages: HashMap<String, Node>,
    current: String,
    pub clicks: RefCell<Vec<String>>,
    pub typed: RefCell<Vec<(String, String)>>,
    pub cleared: RefCell<Vec<String>>,
    pub visits: RefCell<Vec<String>>,
}

impl MockSource {
    pub fn single_page(root: Node) -> Self {
        Self::with_pages(vec![("start", root)])
    }

    pub fn with_pages(pages: Vec<(&str, Node)>) -> Self {
        let current = pages[0].0.to_string();
        Self {
            pages: pages
                .into_iter()
                .map(|(url, root)| (url.to_string(), root))
                .collect(),
            current,
            clicks: RefCell::new(Vec::new()),
            typed: RefCell::new(Vec::new()),
            cleared: RefCell::new(Vec::new()),
            visits: RefCell::new(Vec::new()),
        }
    }

    fn root(&self) -> &Node {
        &self.pages[&self.current]
    }

    fn resolve(&self, element: &MockElement) -> Result<&Node, CrawlError> {
        let mut node = self.root();
        for &index in &element.path {
            node = node
                .children
                .get(index)
                .ok_or_else(|| CrawlError::Interaction {
                    action: "element lookup".to_string(),
                    reason: "handle does not resolve on the current page".to_string(),
                })?;
        }
        Ok(node)
    }

    fn collect(node: &Node, base: &[usize], selector: &str, out: &mut Vec<MockElement>) {
        for (index, child) in node.children.iter().enumerate() {
            let mut path = base.to_vec();
            path.push(index);
            if child.matches(selector) {
                out.push(MockElement { path: path.clone() });
            }
            Self::collect(child, &path, selector, out);
        }
    }

    fn matches_under(&self, parent: &MockElement, selector: &str) -> Result<Vec<MockElement>, CrawlError> {
        let node = self.resolve(parent)?;
        let mut out = Vec::new();
        Self::collect(node, &parent.path, selector, &mut out);
        Ok(out)
    }
}

impl ElementSource for MockSource {
    type Element<'a> = MockElement;

    async fn find(&self, selector: &str) -> Result<MockElement, CrawlError> {
        let mut out = Vec::new();
        Self::collect(self.root(), &[], selector, &mut out);
        out.into_iter().next().ok_or_else(|| CrawlError::NotFound {
            selector: selector.to_string(),
        })
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<MockElement>, CrawlError> {
        let mut out = Vec::new();
        Self::collect(self.root(), &[], selector, &mut out);
        Ok(out)
    }

    async fn find_descendant<'a>(
        &'a self,
        parent: &MockElement,
        selector: &str,
    ) -> Result<MockElement, CrawlError> {
        self.matches_under(parent, selector)?
            .into_iter()
            .next()
            .ok_or_else(|| CrawlError::NotFound {
                selector: selector.to_string(),
            })
    }

    async fn find_descendants<'a>(
        &'a self,
        parent: &MockElement,
        selector: &str,
    ) -> Result<Vec<MockElement>, CrawlError> {
        self.matches_under(parent, selector)
    }

    async fn text(&self, element: &Self::Element<'_>) -> Result<String, CrawlError> {
        Ok(self.resolve(element)?.text.clone())
    }

    async fn attribute(
        &self,
        element: &Self::Element<'_>,
        name: &str,
    ) -> Result<Option<String>, CrawlError> {
        Ok(self.resolve(element)?.attrs.get(name).cloned())
    }

    async fn is_visible(&self, element: &Self::Element<'_>) -> Result<bool, CrawlError> {
        Ok(self.resolve(element)?.visible)
    }

    async fn click(&self, element: &Self::Element<'_>) -> Result<(), CrawlError> {
        let marker = self.resolve(element)?.marker();
        self.clicks.borrow_mut().push(marker);
        Ok(())
    }

    async fn clear(&self, element: &Self::Element<'_>) -> Result<(), CrawlError> {
        let marker = self.resolve(element)?.marker();
        self.cleared.borrow_mut().push(marker);
        Ok(())
    }

    async fn type_text(&self, element: &Self::Element<'_>, text: &str) -> Result<(), CrawlError> {
        let marker = self.resolve(element)?.marker();
        self.typed.borrow_mut().push((marker, text.to_string()));
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<(), CrawlError> {
        self.visits.borrow_mut().push(url.to_string());
        if !self.pages.contains_key(url) {
            return Err(CrawlError::Navigation {
                url: url.to_string(),
                reason: "no such page".to_string(),
            });
        }
        self.current = url.to_string();
        Ok(())
    }
}

/// The standard address-selection UI of the entry page, ready to resolve:
/// two city candidates and two address candidates.
pub(crate) fn address_ui() -> Vec<Node> {
    let panel = Node::new("div")
        .class(crate::selectors::SUGGEST_PANEL)
        .child(
            Node::new("div")
                .class(crate::selectors::SUGGEST_ITEM)
                .attr("data-test", "city-1")
                .text("Moscow"),
        )
        .child(
            Node::new("div")
                .class(crate::selectors::SUGGEST_ITEM)
                .attr("data-test", "city-2")
                .text("Saint Petersburg"),
        );
    let street_region = Node::new("div")
        .class(crate::selectors::SUGGEST_REGION)
        .child(Node::new("input").attr("data-test", "street-input"))
        .child(
            Node::new("div")
                .class(crate::selectors::SUGGEST_ITEM)
                .attr("data-test", "addr-1")
                .child(Node::new("span").text("Lenina 10")),
        );
    let form = Node::new("div")
        .class(crate::selectors::ADDRESS_FORM)
        .child(
            Node::new("div")
                .class(crate::selectors::CITY_INPUT_CONTAINER)
                .child(Node::new("input").attr("data-test", "city-input")),
        )
        .child(Node::new("div").class(crate::selectors::SUGGEST_REGION))
        .child(street_region);
    let info = Node::new("div")
        .class(crate::selectors::ADDRESS_INFO)
        .child(Node::new("button").attr("data-test", "submit-btn"));

    vec![
        Node::new("div").class(crate::selectors::SIDEBAR),
        Node::new("div")
            .class(crate::selectors::EMPTY_ADDRESS_PLUG)
            .attr("data-test", "plug"),
        panel,
        form,
        info,
    ]
}

/// A catalog product card: an anchor with name, price spans, and optionally
/// an image, shaped the way the listing pages render them.
pub(crate) fn product_card(name: &str, href: &str, prices: &[&str], image: Option<&str>) -> Node {
    let mut price_wrap = Node::new("span");
    for price in prices {
        price_wrap = price_wrap.child(Node::new("span").text(price));
    }
    let mut card = Node::new("a")
        .attr("href", href)
        .attr("data-test", name)
        .child(
            Node::new("div")
                .class(crate::selectors::PRODUCT_NAME)
                .text(name),
        )
        .child(
            Node::new("div")
                .class(crate::selectors::PRODUCT_ACTIONS)
                .child(price_wrap),
        );
    if let Some(src) = image {
        card = card.child(
            Node::new("div")
                .class(crate::selectors::PRODUCT_IMAGE)
                .child(Node::new("img").attr("src", src)),
        );
    }
    card
}

/// Scripted [`SelectionProvider`]: canned queries and 1-based choices, with
/// the candidate lists it was shown recorded for assertions.
pub(crate) struct ScriptedSelections {
    pub city_query: String,
    pub street_query: String,
    pub city_choice: usize,
    pub address_choice: usize,
    pub seen_cities: Vec<String>,
    pub seen_addresses: Vec<String>,
}

impl ScriptedSelections {
    pub fn new(
        city_query: &str,
        street_query: &str,
        city_choice: usize,
        address_choice: usize,
    ) -> Self {
        Self {
            city_query: city_query.to_string(),
            street_query: street_query.to_string(),
            city_choice,
            address_choice,
            seen_cities: Vec::new(),
            seen_addresses: Vec::new(),
        }
    }
}

impl SelectionProvider for ScriptedSelections {
    fn input_city_query(&mut self) -> Result<String, CrawlError> {
        Ok(self.city_query.clone())
    }

    fn input_street_query(&mut self) -> Result<String, CrawlError> {
        Ok(self.street_query.clone())
    }

    fn choose_city(&mut self, candidates: &[String]) -> Result<usize, CrawlError> {
        self.seen_cities = candidates.to_vec();
        Ok(self.city_choice)
    }

    fn choose_address(&mut self, candidates: &[String]) -> Result<usize, CrawlError> {
        self.seen_addresses = candidates.to_vec();
        Ok(self.address_choice)
    }
}

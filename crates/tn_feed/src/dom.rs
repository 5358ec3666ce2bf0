//! A small page model standing in for the browser document.
//!
//! Elements are looked up by id through a [`Page`], but every operation that
//! mutates content takes an explicit handle, so tests can hand a bare
//! [`RegionHandle`] to the controller without building a whole page.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A rendered, already escaped piece of markup placed in a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_html(&self) -> &str {
        &self.0
    }
}

/// A container whose children are replaced or extended by the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    children: Vec<Fragment>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[Fragment] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, fragment: Fragment) {
        self.children.push(fragment);
    }

    pub fn replace_with(&mut self, fragment: Fragment) {
        self.children.clear();
        self.children.push(fragment);
    }

    pub fn to_html(&self) -> String {
        self.children.iter().map(Fragment::as_html).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegionHandle(Arc<RwLock<Region>>);

impl RegionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(children: Vec<Fragment>) -> Self {
        Self(Arc::new(RwLock::new(Region { children })))
    }

    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, Region> {
        self.0.read().await
    }

    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, Region> {
        self.0.write().await
    }

    pub async fn snapshot(&self) -> Region {
        self.0.read().await.clone()
    }
}

/// A text field whose value is read when "load more" is clicked.
#[derive(Debug, Clone, Default)]
pub struct InputHandle(Arc<RwLock<String>>);

impl InputHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(value.into())))
    }

    pub async fn value(&self) -> String {
        self.0.read().await.clone()
    }

    pub async fn set_value(&self, value: impl Into<String>) {
        *self.0.write().await = value.into();
    }
}

#[derive(Debug, Clone)]
enum PageElement {
    Region(RegionHandle),
    Input(InputHandle),
    Button,
}

/// Id registry for the elements the feed interacts with.
#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: HashMap<String, PageElement>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_region(&mut self, id: impl Into<String>) -> RegionHandle {
        let handle = RegionHandle::new();
        self.elements
            .insert(id.into(), PageElement::Region(handle.clone()));
        handle
    }

    pub fn add_input(&mut self, id: impl Into<String>, value: impl Into<String>) -> InputHandle {
        let handle = InputHandle::new(value);
        self.elements
            .insert(id.into(), PageElement::Input(handle.clone()));
        handle
    }

    pub fn add_button(&mut self, id: impl Into<String>) {
        self.elements.insert(id.into(), PageElement::Button);
    }

    pub fn region(&self, id: &str) -> Option<RegionHandle> {
        match self.elements.get(id) {
            Some(PageElement::Region(handle)) => Some(handle.clone()),
            _ => None,
        }
    }

    pub fn input(&self, id: &str) -> Option<InputHandle> {
        match self.elements.get(id) {
            Some(PageElement::Input(handle)) => Some(handle.clone()),
            _ => None,
        }
    }

    pub fn has_button(&self, id: &str) -> bool {
        matches!(self.elements.get(id), Some(PageElement::Button))
    }
}

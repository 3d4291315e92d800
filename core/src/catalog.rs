#![deny(missing_docs)]

//! # Endpoint Catalog
//!
//! Groups endpoints by tag for presentation.
//!
//! An endpoint carrying several tags is listed under each of them. Within a
//! tag, endpoints are ordered by path, then by
//! [`HttpMethod`](crate::oas::models::HttpMethod) reading order
//! (get, post, put, patch, delete, options, head). Tags iterate
//! lexicographically.

use crate::oas::models::{EndpointDescriptor, DEFAULT_TAG};
use std::collections::{BTreeMap, BTreeSet};

/// Tag to endpoints grouping, borrowed from the endpoint list.
#[derive(Debug, Clone, Default)]
pub struct EndpointCatalog<'a> {
    groups: BTreeMap<String, Vec<&'a EndpointDescriptor>>,
}

impl<'a> EndpointCatalog<'a> {
    /// Groups endpoints, placing untagged ones under [`DEFAULT_TAG`].
    pub fn group<I>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = &'a EndpointDescriptor>,
    {
        Self::group_with_sentinel(endpoints, DEFAULT_TAG)
    }

    /// Groups endpoints, placing untagged ones under `sentinel`.
    pub fn group_with_sentinel<I>(endpoints: I, sentinel: &str) -> Self
    where
        I: IntoIterator<Item = &'a EndpointDescriptor>,
    {
        let mut groups: BTreeMap<String, Vec<&'a EndpointDescriptor>> = BTreeMap::new();

        for endpoint in endpoints {
            let tags: BTreeSet<&str> = endpoint.tags.iter().map(String::as_str).collect();
            if tags.is_empty() {
                groups.entry(sentinel.to_string()).or_default().push(endpoint);
                continue;
            }
            for tag in tags {
                groups.entry(tag.to_string()).or_default().push(endpoint);
            }
        }

        for members in groups.values_mut() {
            members.sort_by(|a, b| a.path.cmp(&b.path).then(a.method.cmp(&b.method)));
        }

        EndpointCatalog { groups }
    }

    /// Tags in lexicographic order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Endpoints under `tag`, in presentation order. Empty for unknown tags.
    pub fn endpoints(&self, tag: &str) -> &[&'a EndpointDescriptor] {
        self.groups.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(tag, endpoints)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a EndpointDescriptor])> {
        self.groups
            .iter()
            .map(|(tag, members)| (tag.as_str(), members.as_slice()))
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no endpoint was grouped.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

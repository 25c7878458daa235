/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use hmi_types::Tag;

use crate::widgets::Widget;

/// Tag -> widget instances bound to it, in registration order.
///
/// Built once by the binding engine and read-only afterwards. The same tag
/// may carry any number of widgets.
#[derive(Default)]
pub struct SubscriptionIndex {
    by_tag: HashMap<Tag, Vec<Rc<dyn Widget>>>,
    // First-seen order of tags, for the subscribe request.
    order: Vec<Tag>,
}

impl SubscriptionIndex {
    pub(crate) fn insert(&mut self, tag: Tag, widget: Rc<dyn Widget>) {
        match self.by_tag.get_mut(&tag) {
            Some(widgets) => widgets.push(widget),
            None => {
                self.order.push(tag.clone());
                self.by_tag.insert(tag, vec![widget]);
            }
        }
    }

    pub fn subscribers(&self, tag: &str) -> &[Rc<dyn Widget>] {
        self.by_tag.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Bound tags in the order they were first bound.
    pub fn tags(&self) -> &[Tag] {
        &self.order
    }

    /// Total widget instances across all tags.
    pub fn len(&self) -> usize {
        self.by_tag.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

impl fmt::Debug for SubscriptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for tag in &self.order {
            map.entry(&tag.as_str(), &self.subscribers(tag.as_str()).len());
        }
        map.finish()
    }
}

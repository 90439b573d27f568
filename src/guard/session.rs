//! Per-root view session
//!
//! One session is created for each root wrap and shared by every nested
//! view under it. It owns the identity cache that makes repeated reads
//! of the same nested object return the same view.
//!
//! The cache holds weak references only: an entry lives exactly as long
//! as some caller holds its view, and the whole table goes away with the
//! last view of the session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::view::GuardedView;
use crate::schema::Matcher;
use crate::value::Value;

#[derive(Debug)]
pub(crate) struct ViewSession {
    quiet: bool,
    matcher: Matcher,
    /// Object identity -> live nested view
    cache: RefCell<HashMap<usize, Weak<GuardedView>>>,
}

impl ViewSession {
    pub(crate) fn new(quiet: bool, matcher: Matcher) -> Self {
        Self {
            quiet,
            matcher,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub(crate) fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub(crate) fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Returns the live view already wrapping `value`, if any.
    pub(crate) fn lookup(&self, value: &Value) -> Option<Rc<GuardedView>> {
        let identity = value.identity()?;
        let view = self.cache.borrow().get(&identity)?.upgrade()?;
        // A live view pins its target, so the address cannot have been reused.
        view.value().same(value).then_some(view)
    }

    /// Records `view` as the canonical view of its target.
    pub(crate) fn remember(&self, view: &Rc<GuardedView>) {
        let Some(identity) = view.value().identity() else {
            return;
        };
        let mut cache = self.cache.borrow_mut();
        cache.retain(|_, entry| entry.strong_count() > 0);
        cache.insert(identity, Rc::downgrade(view));
    }

    /// Number of nested views currently alive in this session.
    pub(crate) fn live_views(&self) -> usize {
        self.cache
            .borrow()
            .values()
            .filter(|entry| entry.strong_count() > 0)
            .count()
    }
}

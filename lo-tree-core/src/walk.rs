//! Read-only traversal over learning-object forests.
//!
//! Every walk is pre-order, depth-first, left-to-right. Results borrow from the
//! tree; nothing is cloned.

use crate::lo::{Lo, LoKind};

/// Which nodes a walk may descend into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// Every node with children.
    All,
    /// Only nodes of kind [`LoKind::Unit`]; children of any other container are never visited.
    UnitsOnly,
}

impl Descent {
    fn enters(self, lo: &Lo) -> bool {
        match self {
            Descent::All => true,
            Descent::UnitsOnly => lo.kind.is_unit(),
        }
    }
}

/// Collects, in pre-order, every visited node matching `predicate`.
pub fn collect_los<'a, P>(los: &'a [Lo], descent: Descent, predicate: P) -> Vec<&'a Lo>
where
    P: Fn(&Lo) -> bool,
{
    let mut result = Vec::new();
    collect_into(los, descent, &predicate, &mut result);
    result
}

fn collect_into<'a, P>(los: &'a [Lo], descent: Descent, predicate: &P, out: &mut Vec<&'a Lo>)
where
    P: Fn(&Lo) -> bool,
{
    for lo in los {
        if predicate(lo) {
            out.push(lo);
        }
        if descent.enters(lo) {
            collect_into(lo.children(), descent, predicate, out);
        }
    }
}

/// Every node in the forest, each exactly once, in pre-order.
pub fn flatten_los(los: &[Lo]) -> Vec<&Lo> {
    collect_los(los, Descent::All, |_| true)
}

/// Nodes of kind `lotype`, descending only through units.
pub fn find_los<'a>(los: &'a [Lo], lotype: &LoKind) -> Vec<&'a Lo> {
    collect_los(los, Descent::UnitsOnly, |lo| &lo.kind == lotype)
}

/// Nodes carrying a non-empty `video`, of any kind, descending only through units.
pub fn find_video_los(los: &[Lo]) -> Vec<&Lo> {
    collect_los(los, Descent::UnitsOnly, |lo| lo.video_url().is_some())
}

/// Runs [`find_los`] over the children of each element, treating every
/// element as a topic regardless of its own kind.
pub fn all_los<'a>(lotype: &LoKind, los: &'a [Lo]) -> Vec<&'a Lo> {
    los.iter()
        .flat_map(|topic| find_los(topic.children(), lotype))
        .collect()
}

/// Runs [`find_video_los`] over the children of each element.
pub fn all_video_los(los: &[Lo]) -> Vec<&Lo> {
    los.iter()
        .flat_map(|topic| find_video_los(topic.children()))
        .collect()
}

/// First node in pre-order whose `route` equals `route`.
pub fn find_by_route<'a>(los: &'a [Lo], route: &str) -> Option<&'a Lo> {
    flatten_los(los)
        .into_iter()
        .find(|lo| lo.route.as_deref() == Some(route))
}

//! Parent-schedulability validation: Theorem 1 of Feng & Mok's composition
//! theory for BDR interfaces.
//!
//! Given a set of sibling components' BDR interfaces on a core with parent
//! interface `(alpha_parent = 1, delta_parent = 0)`, the core is schedulable
//! iff `sum(alpha_i) <= alpha_parent` and every `delta_i > delta_parent`.

/// A conservative parent interface derived from a set of child interfaces,
/// useful when this core is itself a component nested under another parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentInterface {
    pub alpha: f64,
    pub delta: f64,
}

/// Small slack subtracted from the minimum child `delta` when deriving a
/// conservative parent `delta`, so the derived interface is never
/// accidentally exactly as tight as its tightest child.
const EPSILON: f64 = 1e-6;

/// Check Theorem 1 for a set of sibling BDR interfaces against a parent
/// interface, and derive a conservative parent interface from the children.
///
/// Returns `(is_schedulable, derived_parent)`.
pub fn validate_theorem1(
    children: &[(f64, f64)],
    parent_alpha: f64,
    parent_delta: f64,
) -> (bool, ParentInterface) {
    let total_alpha: f64 = children.iter().map(|(alpha, _)| alpha).sum();
    let all_delta_ok = children.iter().all(|(_, delta)| *delta > parent_delta);

    let is_schedulable = total_alpha <= parent_alpha && all_delta_ok;

    let min_delta = children
        .iter()
        .map(|(_, delta)| *delta)
        .fold(f64::INFINITY, f64::min);
    let derived_delta = if min_delta.is_finite() {
        (min_delta - EPSILON).max(0.0)
    } else {
        0.0
    };

    let derived = ParentInterface {
        alpha: total_alpha,
        delta: derived_delta,
    };

    (is_schedulable, derived)
}

#[test]
fn passes_when_alpha_sum_and_delta_margin_hold() {
    let children = [(0.3, 2.0), (0.2, 3.0)];
    let (ok, derived) = validate_theorem1(&children, 1.0, 0.0);
    assert!(ok);
    assert_approx_eq::assert_approx_eq!(derived.alpha, 0.5, 1e-9);
}

#[test]
fn fails_when_alpha_sum_exceeds_parent() {
    let children = [(0.6, 2.0), (0.6, 3.0)];
    let (ok, _) = validate_theorem1(&children, 1.0, 0.0);
    assert!(!ok);
}

#[test]
fn fails_when_any_delta_does_not_exceed_parent() {
    let children = [(0.3, 0.0), (0.2, 3.0)];
    let (ok, _) = validate_theorem1(&children, 1.0, 0.0);
    assert!(!ok);
}

//! Property-based tests for binding emission and tag folding.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use weft_core::Ref;

use crate::exec::bindings::Bindings;
use crate::exec::context::ExecutionContext;
use crate::exec::fixed::FixedNode;
use crate::exec::node::{Cursor, Enumerator, PlanNode, Tagger};
use crate::exec::tag::TagNode;

/// Strategy for generating arbitrary `Ref` instances.
fn arb_ref() -> impl Strategy<Value = Ref> {
    (any::<bool>(), any::<u64>()).prop_map(|(node, id)| {
        if node {
            Ref::node(id)
        } else {
            Ref::statement(id)
        }
    })
}

/// Strategy for short tag names.
fn arb_name() -> impl Strategy<Value = String> {
    "[a-z]{1,4}"
}

proptest! {
    /// After the k-th successful advance, the emission equals the child's
    /// bindings overwritten by every dynamic tag bound to the k-th result,
    /// overwritten by every fixed tag.
    #[test]
    fn emission_matches_the_model(
        values in prop::collection::vec(arb_ref(), 1..6),
        tags in prop::collection::vec(arb_name(), 0..4),
        fixed in prop::collection::hash_map(arb_name(), arb_ref(), 0..4),
    ) {
        // The child carries one binding of its own so override precedence
        // is exercised.
        let inner = TagNode::with_tags(
            Box::new(FixedNode::from_values(values.clone())),
            ["inherited"],
        );

        let mut outer = TagNode::with_tags(Box::new(inner), tags.clone());
        for (name, value) in &fixed {
            outer.add_fixed_tag(name.clone(), *value);
        }

        let ctx = ExecutionContext::new();
        let mut cur = outer.iterate();

        for current in &values {
            prop_assert!(cur.advance(&ctx));

            let mut expected = Bindings::new();
            expected.bind("inherited", *current);
            for name in &tags {
                expected.bind(name.clone(), *current);
            }
            for (name, value) in &fixed {
                expected.bind(name.clone(), *value);
            }

            let mut actual = Bindings::new();
            cur.emit_bindings(&mut actual);
            prop_assert_eq!(actual, expected);
        }

        prop_assert!(!cur.advance(&ctx));
        prop_assert!(cur.last_error().is_none());
        cur.release().expect("release");
    }

    /// Fixed-tag bindings never change value as the cursor advances.
    #[test]
    fn fixed_tags_are_invariant_across_the_cursor_lifetime(
        values in prop::collection::vec(arb_ref(), 1..6),
        name in arb_name(),
        fixed_value in arb_ref(),
    ) {
        let mut node = TagNode::new(Box::new(FixedNode::from_values(values.clone())));
        node.add_fixed_tag(name.clone(), fixed_value);

        let ctx = ExecutionContext::new();
        let mut cur = node.iterate();

        while cur.advance(&ctx) {
            let mut bindings = Bindings::new();
            cur.emit_bindings(&mut bindings);
            prop_assert_eq!(bindings.get(&name), Some(fixed_value));
        }
        cur.release().expect("release");
    }

    /// Tagging never alters cost or cardinality estimates.
    #[test]
    fn estimates_pass_through_for_any_tag_configuration(
        values in prop::collection::vec(arb_ref(), 0..6),
        tags in prop::collection::vec(arb_name(), 0..4),
        fixed in prop::collection::hash_map(arb_name(), arb_ref(), 0..4),
    ) {
        let child = FixedNode::from_values(values);
        let child_stats = child.stats();
        let child_size = child.size_estimate();

        let mut node = TagNode::with_tags(Box::new(child), tags);
        for (name, value) in fixed {
            node.add_fixed_tag(name, value);
        }

        prop_assert_eq!(node.stats(), child_stats);
        prop_assert_eq!(node.size_estimate(), child_size);
    }
}

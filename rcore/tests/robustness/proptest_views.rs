use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use rcore::vector::{DoubleVector, Encoding, IntVector, LogicalVector, Vector, INT_NA};
use rcore::vector::Element;

fn assert_materialize_matches<T: Element>(view: &Vector<T>) -> Result<(), TestCaseError> {
    let block = view.materialize();
    prop_assert_eq!(block.size(), view.size());
    prop_assert!(view.size() == 1 || block.encoding() == Encoding::Block);
    for i in 0..view.size() {
        prop_assert!(block.get(i).identical(view.get(i)), "element {} differs", i);
    }
    Ok(())
}

fn arb_values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(prop_oneof![9 => -100i32..100, 1 => Just(INT_NA)], 1..20)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn subset_materializes_to_accessor(
        values in arb_values(),
        index in prop::collection::vec(prop_oneof![9 => -2i32..25, 1 => Just(INT_NA)], 0..30),
    ) {
        let base = IntVector::from_values(&values);
        let view = base.subset(&IntVector::from_values(&index));
        assert_materialize_matches(&view)?;
        assert_materialize_matches(&view.as_double())?;
    }

    #[test]
    fn exclusion_materializes_to_accessor(values in arb_values(), pick in any::<prop::sample::Index>()) {
        let base = IntVector::from_values(&values);
        let view = base.exclude(pick.index(values.len())).expect("index in range");
        prop_assert_eq!(view.size(), values.len() - 1);
        assert_materialize_matches(&view)?;
    }

    #[test]
    fn sequence_materializes_to_accessor(from in -50i32..50, len in 0i32..40, step in 1i32..5) {
        let view = IntVector::sequence(from, from + len, step).expect("valid progression");
        assert_materialize_matches(&view)?;
        assert_materialize_matches(&view.as_logical())?;
    }

    #[test]
    fn double_sequence_materializes_to_accessor(from in -10.0f64..10.0, steps in 0usize..30, step in 0.01f64..2.0) {
        let to = from + steps as f64 * step;
        let view = DoubleVector::sequence(from, to, step).expect("valid progression");
        assert_materialize_matches(&view)?;
        assert_materialize_matches(&view.as_int())?;
    }

    #[test]
    fn coercion_materializes_to_accessor(values in prop::collection::vec(any::<bool>(), 2..20)) {
        let logicals = LogicalVector::adopt(values.into_iter().map(Into::into).collect());
        assert_materialize_matches(&logicals.as_int())?;
        assert_materialize_matches(&logicals.as_double())?;
    }
}

/// All unordered pairs from `items`, index order preserved (`i < j`).
pub fn pair_combinations<T: Clone>(items: &[T]) -> Vec<(T, T)> {
    let mut pairs = Vec::new();
    for (i, first) in items.iter().enumerate() {
        for second in items.iter().skip(i + 1) {
            pairs.push((first.clone(), second.clone()));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::pair_combinations;

    #[test]
    fn generates_n_choose_two_in_input_order() {
        let pairs = pair_combinations(&["a", "b", "c", "d"]);
        assert_eq!(
            pairs,
            vec![
                ("a", "b"),
                ("a", "c"),
                ("a", "d"),
                ("b", "c"),
                ("b", "d"),
                ("c", "d"),
            ]
        );
    }

    #[test]
    fn short_inputs_yield_no_pairs() {
        assert!(pair_combinations(&["a"]).is_empty());
        assert!(pair_combinations::<&str>(&[]).is_empty());
    }
}

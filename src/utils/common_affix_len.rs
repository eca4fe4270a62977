/// Number of leading elements `old` and `new` share.
pub fn common_prefix_len<T: PartialEq>(old: &[T], new: &[T]) -> usize {
    old.iter().zip(new).take_while(|(a, b)| a == b).count()
}

/// Number of trailing elements `old` and `new` share.
pub fn common_suffix_len<T: PartialEq>(old: &[T], new: &[T]) -> usize {
    old.iter()
        .rev()
        .zip(new.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

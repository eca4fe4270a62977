use super::group::Group;

/// Finds the heaviest chain of groups in `start..=end` whose old-text
/// positions never decrease, weighted by character count.
///
/// The best chain starting at each group is memoized by walking the range
/// backwards; the first chain found wins ties.
#[must_use]
pub(crate) fn max_path(groups: &[Group], start: usize, end: usize) -> Vec<usize> {
    if start > end {
        return Vec::new();
    }

    // (chars of the best chain starting here, next group on it)
    let mut best: Vec<(usize, Option<usize>)> = vec![(0, None); end - start + 1];
    for i in (start..=end).rev() {
        let mut tail = (0, None);
        for j in i + 1..=end {
            if groups[j].old_number < groups[i].old_number {
                continue;
            }
            let chars = best[j - start].0;
            if chars > tail.0 {
                tail = (chars, Some(j));
            }
        }
        best[i - start] = (groups[i].chars + tail.0, tail.1);
    }

    let mut head = None;
    let mut max_chars = 0;
    for i in start..=end {
        if best[i - start].0 > max_chars {
            max_chars = best[i - start].0;
            head = Some(i);
        }
    }

    std::iter::successors(head, |&i| best[i - start].1).collect()
}

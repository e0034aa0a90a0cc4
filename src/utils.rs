/// All ways to split `total` into `parts` ordered non-negative summands
/// ([weak compositions][composition]).
///
/// The leftmost summand is largest first, so for `total = 1` the single
/// non-zero slot walks from left to right:
///
/// ```text
/// compositions(1, 3) = [1,0,0], [0,1,0], [0,0,1]
/// compositions(2, 2) = [2,0], [1,1], [0,2]
/// ```
///
/// [composition]: https://en.wikipedia.org/wiki/Composition_(combinatorics)
pub fn compositions(total: usize, parts: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    let mut current = Vec::with_capacity(parts);
    compositions_into(total, parts, &mut current, &mut result);
    result
}

fn compositions_into(total: usize, parts: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    match parts {
        0 => {
            if total == 0 {
                out.push(current.clone());
            }
        }
        1 => {
            current.push(total);
            out.push(current.clone());
            current.pop();
        }
        _ => {
            for first in (0..=total).rev() {
                current.push(first);
                compositions_into(total - first, parts - 1, current, out);
                current.pop();
            }
        }
    }
}

/// Number of weak compositions of `total` into `parts` summands.
///
/// ```text
/// C(total + parts - 1, parts - 1)
/// ```
pub fn num_compositions(total: usize, parts: usize) -> usize {
    if parts == 0 {
        return usize::from(total == 0);
    }
    let k = parts - 1;
    let n = total + k;
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

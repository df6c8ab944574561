//! Attribute-match similarity
//!
//! Counts exact matches over a fixed list of keys. A key only counts when
//! both sides carry a value for it.

/// Outcome of comparing two attribute vectors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeMatch<K> {
    /// Keys whose values are equal on both sides, in input order
    pub matched: Vec<K>,
    /// Number of keys present on both sides
    pub compared: usize,
    /// matched / compared, or 0.0 when nothing was comparable
    pub score: f64,
}

/// Compare `(key, left, right)` triples.
///
/// `None` means the value is absent or null on that side; such keys are not
/// comparable and do not count towards the denominator. Equality is plain
/// `PartialEq` on the raw values.
pub fn attribute_match<'a, K, V, I>(pairs: I) -> AttributeMatch<K>
where
    V: PartialEq + ?Sized + 'a,
    I: IntoIterator<Item = (K, Option<&'a V>, Option<&'a V>)>,
{
    let mut matched = Vec::new();
    let mut compared = 0usize;

    for (key, left, right) in pairs {
        if let (Some(left), Some(right)) = (left, right) {
            compared += 1;
            if left == right {
                matched.push(key);
            }
        }
    }

    let score = if compared == 0 {
        0.0
    } else {
        matched.len() as f64 / compared as f64
    };

    AttributeMatch {
        matched,
        compared,
        score,
    }
}

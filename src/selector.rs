//! Resolves comma-separated selectors into members of a closed set.

use itertools::Itertools;
use log::debug;

/// A member of a small, closed set of values that can be selected by name.
pub trait Selectable: Copy + PartialEq + Sized + 'static {
    /// Every member of the set, in canonical order.
    fn all() -> &'static [Self];

    /// Alternative names for members of the set.
    ///
    /// Aliases are matched in addition to each member's
    /// [`name`](Selectable::name). Most sets have none.
    fn aliases() -> &'static [(&'static str, Self)] {
        &[]
    }

    /// The canonical, lowercase name of the member.
    fn name(&self) -> &str;

    /// Finds the member named by `token`, which must already be trimmed
    /// and lowercased.
    fn from_token(token: &str) -> Option<Self> {
        Self::all()
            .iter()
            .find(|member| member.name() == token)
            .or_else(|| {
                Self::aliases()
                    .iter()
                    .find(|(alias, _)| *alias == token)
                    .map(|(_, member)| member)
            })
            .copied()
    }
}

/// Resolves a selector such as `"claude, gemini"` into members of `T`.
///
/// With no selector, every member is returned. Otherwise the selector is
/// split on commas, each token is trimmed and lowercased, aliases are mapped
/// to their members, unknown tokens are dropped, and duplicates are removed
/// (keeping the first occurrence). If nothing is left, every member is
/// returned.
///
/// # Examples
///
/// ```
/// use xdraft::selector::resolve;
/// use xdraft::style::Style;
///
/// let styles: Vec<Style> = resolve(Some("story, DIRECT, nonsense"));
/// assert_eq!(styles, vec![Style::Story, Style::Direct]);
///
/// let styles: Vec<Style> = resolve(Some("nonsense"));
/// assert_eq!(styles, Style::all());
/// ```
pub fn resolve<T: Selectable>(selector: Option<&str>) -> Vec<T> {
    let Some(selector) = selector else {
        return T::all().to_vec();
    };

    let selected = selector
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter_map(|token| {
            let member = T::from_token(&token);
            if member.is_none() && !token.is_empty() {
                debug!("ignoring unknown selection: {token}");
            }
            member
        })
        .fold(Vec::new(), |mut acc, member| {
            if !acc.contains(&member) {
                acc.push(member);
            }
            acc
        });

    if selected.is_empty() {
        debug!(
            "no valid selections in '{selector}', using all of {}",
            T::all().iter().map(|m| m.name()).join(", ")
        );
        T::all().to_vec()
    } else {
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Fruit {
        Apple,
        Banana,
        Cherry,
    }

    impl Selectable for Fruit {
        fn all() -> &'static [Self] {
            &[Fruit::Apple, Fruit::Banana, Fruit::Cherry]
        }

        fn aliases() -> &'static [(&'static str, Self)] {
            &[("plantain", Fruit::Banana)]
        }

        fn name(&self) -> &str {
            match self {
                Fruit::Apple => "apple",
                Fruit::Banana => "banana",
                Fruit::Cherry => "cherry",
            }
        }
    }

    #[test]
    fn it_returns_everything_without_a_selector() {
        let fruit: Vec<Fruit> = resolve(None);
        assert_eq!(fruit, vec![Fruit::Apple, Fruit::Banana, Fruit::Cherry]);
    }

    #[test]
    fn it_preserves_selection_order() {
        let fruit: Vec<Fruit> = resolve(Some("cherry,apple"));
        assert_eq!(fruit, vec![Fruit::Cherry, Fruit::Apple]);
    }

    #[test]
    fn it_trims_and_lowercases_tokens() {
        let fruit: Vec<Fruit> = resolve(Some("  Apple , CHERRY "));
        assert_eq!(fruit, vec![Fruit::Apple, Fruit::Cherry]);
    }

    #[test]
    fn it_maps_aliases() {
        let fruit: Vec<Fruit> = resolve(Some("plantain"));
        assert_eq!(fruit, vec![Fruit::Banana]);
    }

    #[test]
    fn it_drops_unknown_tokens() {
        let fruit: Vec<Fruit> = resolve(Some("kiwi,banana"));
        assert_eq!(fruit, vec![Fruit::Banana]);
    }

    #[test]
    fn it_removes_duplicates() {
        let fruit: Vec<Fruit> = resolve(Some("banana,plantain,apple,banana"));
        assert_eq!(fruit, vec![Fruit::Banana, Fruit::Apple]);
    }

    #[test]
    fn it_falls_back_to_everything_when_nothing_matches() {
        let fruit: Vec<Fruit> = resolve(Some("kiwi,mango"));
        assert_eq!(fruit, vec![Fruit::Apple, Fruit::Banana, Fruit::Cherry]);
    }

    #[test]
    fn it_falls_back_to_everything_for_an_empty_selector() {
        let fruit: Vec<Fruit> = resolve(Some(""));
        assert_eq!(fruit, vec![Fruit::Apple, Fruit::Banana, Fruit::Cherry]);

        let fruit: Vec<Fruit> = resolve(Some(" , ,"));
        assert_eq!(fruit, vec![Fruit::Apple, Fruit::Banana, Fruit::Cherry]);
    }
}

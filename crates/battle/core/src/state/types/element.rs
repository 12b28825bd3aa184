//! Elemental alignment and the relationships between elements.
//!
//! Two independent relations exist and must not be conflated:
//!
//! - **Counter pairs** (Venus↔Mars, Jupiter↔Mercury) drive Djinn
//!   compatibility tiers.
//! - **The advantage triangle** (Venus→Jupiter→Mercury→Mars→Venus) drives
//!   the psynergy damage multiplier.

/// The four elemental alignments plus Neutral.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Venus,
    Mars,
    Mercury,
    Jupiter,
    Neutral,
}

/// How a unit's element relates to a Djinn's element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ElementCompatibility {
    Same,
    Counter,
    Neutral,
}

impl Element {
    /// Returns the opposing element of a counter pair, if any.
    ///
    /// Venus↔Mars and Jupiter↔Mercury oppose each other; Neutral opposes
    /// nothing.
    pub fn counter(self) -> Option<Element> {
        match self {
            Element::Venus => Some(Element::Mars),
            Element::Mars => Some(Element::Venus),
            Element::Jupiter => Some(Element::Mercury),
            Element::Mercury => Some(Element::Jupiter),
            Element::Neutral => None,
        }
    }

    /// Compatibility of a unit with this element against a Djinn of `other`.
    pub fn compatibility_with(self, other: Element) -> ElementCompatibility {
        if self == other {
            return ElementCompatibility::Same;
        }
        if self.counter() == Some(other) {
            return ElementCompatibility::Counter;
        }
        ElementCompatibility::Neutral
    }

    /// True if this element sits above `other` on the advantage triangle.
    ///
    /// Venus→Jupiter, Jupiter→Mercury, Mercury→Mars, Mars→Venus.
    pub fn has_advantage_over(self, other: Element) -> bool {
        matches!(
            (self, other),
            (Element::Venus, Element::Jupiter)
                | (Element::Jupiter, Element::Mercury)
                | (Element::Mercury, Element::Mars)
                | (Element::Mars, Element::Venus)
        )
    }
}

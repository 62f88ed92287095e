//! Flow classification of relationships by label keywords.
//!
//! Each relationship is assigned to the first [`FlowKind`] (in declaration
//! order) with a keyword contained in its lowercased label. Case exports are
//! mostly French, so each class lists the French vocabulary first and the
//! English equivalents after it.

use casenet_core::model::{Edge, Snapshot};
use serde::Serialize;

use crate::graph::build::GraphModel;

/// What a relationship carries between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    Information,
    Money,
    Influence,
    Evidence,
    Unclassified,
}

impl FlowKind {
    /// Classes in match priority order; `Unclassified` is the fallback.
    pub const ALL: [Self; 5] = [
        Self::Information,
        Self::Money,
        Self::Influence,
        Self::Evidence,
        Self::Unclassified,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Information => "information",
            Self::Money => "money",
            Self::Influence => "influence",
            Self::Evidence => "evidence",
            Self::Unclassified => "unclassified",
        }
    }

    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Information => &[
                "téléphone",
                "message",
                "email",
                "dit",
                "informe",
                "communique",
                "rencontre",
                "appel",
                "phone",
                "call",
                "told",
                "inform",
                "meet",
            ],
            Self::Money => &[
                "paie",
                "donne",
                "transfert",
                "transaction",
                "argent",
                "virement",
                "achète",
                "vend",
                "pay",
                "transfer",
                "money",
                "wire",
                "buy",
                "sell",
            ],
            Self::Influence => &[
                "ordonne",
                "contrôle",
                "dirige",
                "emploie",
                "supervise",
                "menace",
                "influence",
                "order",
                "control",
                "direct",
                "employ",
                "threat",
            ],
            Self::Evidence => &[
                "possède",
                "détient",
                "trouvé",
                "vu",
                "témoin",
                "preuve",
                "indice",
                "own",
                "hold",
                "found",
                "saw",
                "witness",
                "evidence",
                "clue",
            ],
            Self::Unclassified => &[],
        }
    }

    /// Classify one relationship label.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.keywords().iter().any(|w| label.contains(w)))
            .unwrap_or(Self::Unclassified)
    }
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relationships grouped by flow kind, in [`FlowKind::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowGroups {
    pub groups: Vec<(FlowKind, Vec<Edge>)>,
}

/// Classify every snapshot relationship whose endpoints are both in the
/// model. Dangling relationships and self-loops are skipped, matching what
/// the model dropped.
#[must_use]
pub fn classify_flows(snapshot: &Snapshot, model: &GraphModel) -> FlowGroups {
    let mut groups: Vec<(FlowKind, Vec<Edge>)> =
        FlowKind::ALL.into_iter().map(|k| (k, Vec::new())).collect();

    for edge in snapshot.edges() {
        if edge.from == edge.to
            || model.index_of(&edge.from).is_none()
            || model.index_of(&edge.to).is_none()
        {
            continue;
        }

        let kind = FlowKind::classify(&edge.label);
        if let Some((_, bucket)) = groups.iter_mut().find(|(k, _)| *k == kind) {
            bucket.push(edge.clone());
        }
    }

    FlowGroups { groups }
}

//! Identity resolution between the salary source and a projection source.
//!
//! Each priced player is joined to at most one projected player:
//!
//! 1. A manual override for the priced name always wins.
//! 2. A match accepted by an earlier run is reused as long as its target
//!    still exists and no override now applies.
//! 3. An exact normalized-name match at the same position is taken as is.
//! 4. Otherwise the best fuzzy match over all projected names is accepted if
//!    it clears the threshold. If its position disagrees, the search is
//!    repeated over same-position candidates only and must clear the
//!    threshold again.
//!
//! Matching is many-to-one: two priced players may bind to the same
//! projection. Players with no accepted match come back in
//! [`Resolution::unresolved`]; the resolver never fails on unmatched input.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::application::fuzzy;
use crate::config::ResolverConfig;
use crate::domain::{NormalizedName, PlayerId, Position, PricedPlayer, ProjectedPlayer, ResolvedPlayer};

/// Caller-supplied mapping from a priced player's normalized name to the
/// normalized name of the projection it should use.
pub type ManualOverrides = BTreeMap<NormalizedName, NormalizedName>;

/// How a match was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Override,
    Exact,
    Fuzzy,
    /// Fuzzy match retried among same-position candidates.
    PositionGated,
}

/// An accepted match from a priced player to a projection record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchLink {
    pub projected: NormalizedName,
    pub position: Position,
    pub score: u8,
    pub source: MatchSource,
}

/// Output of one resolution pass. Owned by the caller and passed back in to
/// [`IdentityResolver::resolve_again`].
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub resolved: Vec<ResolvedPlayer>,
    pub unresolved: Vec<PricedPlayer>,
    pub links: BTreeMap<PlayerId, MatchLink>,
}

impl Resolution {
    #[must_use]
    pub fn link(&self, id: PlayerId) -> Option<&MatchLink> {
        self.links.get(&id)
    }
}

/// Reconciles priced players against projected players.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    config: ResolverConfig,
}

impl IdentityResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolve from scratch.
    pub fn resolve(
        &self,
        priced: &[PricedPlayer],
        projected: &[ProjectedPlayer],
        overrides: &ManualOverrides,
    ) -> Resolution {
        self.run(priced, projected, overrides, None)
    }

    /// Resolve again with updated overrides, keeping matches from `prior`.
    pub fn resolve_again(
        &self,
        prior: &Resolution,
        priced: &[PricedPlayer],
        projected: &[ProjectedPlayer],
        overrides: &ManualOverrides,
    ) -> Resolution {
        self.run(priced, projected, overrides, Some(&prior.links))
    }

    /// Same-position projections ranked by similarity, for manual disposition.
    pub fn suggestions<'a>(
        &self,
        player: &PricedPlayer,
        projected: &'a [ProjectedPlayer],
        limit: usize,
    ) -> Vec<(&'a ProjectedPlayer, u8)> {
        let mut ranked: Vec<(&ProjectedPlayer, u8)> = projected
            .iter()
            .filter(|c| c.position == player.position)
            .map(|c| {
                (
                    c,
                    fuzzy::weighted_ratio(player.normalized.as_str(), c.normalized.as_str()),
                )
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    fn threshold_for(&self, position: Position) -> u8 {
        match position {
            Position::Defense => self.config.defense_threshold,
            _ => self.config.threshold,
        }
    }

    fn run(
        &self,
        priced: &[PricedPlayer],
        projected: &[ProjectedPlayer],
        overrides: &ManualOverrides,
        prior: Option<&BTreeMap<PlayerId, MatchLink>>,
    ) -> Resolution {
        let catalog = Catalog::new(projected);
        let overrides: HashMap<NormalizedName, NormalizedName> = overrides
            .iter()
            .map(|(k, v)| {
                (
                    NormalizedName::new(k.as_str()),
                    NormalizedName::new(v.as_str()),
                )
            })
            .collect();

        let mut resolution = Resolution::default();
        let mut reused = 0usize;

        for player in priced {
            let link = if let Some(target) = overrides.get(&player.normalized) {
                let link = catalog.lookup_override(target, player.position);
                if link.is_none() {
                    warn!(
                        player = %player.name,
                        target = %target,
                        "manual override points at an unknown projection"
                    );
                }
                link
            } else if let Some(prev) = prior
                .and_then(|links| links.get(&player.id))
                .filter(|l| l.source != MatchSource::Override)
                .filter(|l| catalog.get(&l.projected, l.position).is_some())
            {
                reused += 1;
                Some(prev.clone())
            } else {
                self.match_one(player, &catalog)
            };

            match link.and_then(|l| catalog.get(&l.projected, l.position).map(|p| (l, p))) {
                Some((link, target)) => {
                    resolution.resolved.push(ResolvedPlayer::join(player, target));
                    resolution.links.insert(player.id, link);
                }
                None => resolution.unresolved.push(player.clone()),
            }
        }

        info!(
            priced = priced.len(),
            projected = projected.len(),
            resolved = resolution.resolved.len(),
            unresolved = resolution.unresolved.len(),
            reused,
            overrides = overrides.len(),
            "identity resolution complete"
        );
        resolution
    }

    fn match_one(&self, player: &PricedPlayer, catalog: &Catalog<'_>) -> Option<MatchLink> {
        if catalog.get(&player.normalized, player.position).is_some() {
            return Some(MatchLink {
                projected: player.normalized.clone(),
                position: player.position,
                score: 100,
                source: MatchSource::Exact,
            });
        }

        let threshold = self.threshold_for(player.position);
        let query = player.normalized.as_str();

        let (best, score) = fuzzy::best_match(
            query,
            catalog.all().map(|c| (c.normalized.as_str(), c)),
        )?;
        if score < threshold {
            return None;
        }
        if best.position == player.position {
            return Some(MatchLink {
                projected: best.normalized.clone(),
                position: best.position,
                score,
                source: MatchSource::Fuzzy,
            });
        }

        debug!(
            player = %player.name,
            rejected = %best.name,
            rejected_position = %best.position,
            score,
            "position mismatch, retrying among same-position candidates"
        );
        let (gated, gated_score) = fuzzy::best_match(
            query,
            catalog
                .all()
                .filter(|c| c.position == player.position)
                .map(|c| (c.normalized.as_str(), c)),
        )?;
        (gated_score >= threshold).then(|| MatchLink {
            projected: gated.normalized.clone(),
            position: gated.position,
            score: gated_score,
            source: MatchSource::PositionGated,
        })
    }
}

/// Projection records deduplicated by (normalized name, position), first wins.
struct Catalog<'a> {
    entries: Vec<&'a ProjectedPlayer>,
    index: HashMap<(NormalizedName, Position), usize>,
}

impl<'a> Catalog<'a> {
    fn new(projected: &'a [ProjectedPlayer]) -> Self {
        let mut entries = Vec::with_capacity(projected.len());
        let mut index = HashMap::with_capacity(projected.len());
        for player in projected {
            let key = (player.normalized.clone(), player.position);
            if index.contains_key(&key) {
                continue;
            }
            index.insert(key, entries.len());
            entries.push(player);
        }
        Self { entries, index }
    }

    fn all(&self) -> impl Iterator<Item = &'a ProjectedPlayer> + '_ {
        self.entries.iter().copied()
    }

    fn get(&self, name: &NormalizedName, position: Position) -> Option<&'a ProjectedPlayer> {
        self.index
            .get(&(name.clone(), position))
            .map(|&i| self.entries[i])
    }

    /// Override targets are names only; prefer the priced player's position.
    fn lookup_override(&self, target: &NormalizedName, position: Position) -> Option<MatchLink> {
        let found = self
            .get(target, position)
            .or_else(|| self.entries.iter().copied().find(|c| &c.normalized == target))?;
        Some(MatchLink {
            projected: found.normalized.clone(),
            position: found.position,
            score: 100,
            source: MatchSource::Override,
        })
    }
}

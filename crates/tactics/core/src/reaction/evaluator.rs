//! Reaction scoring and selection.
//!
//! Every evaluation is stateless: a fresh [`ReactionOpportunity`] goes from
//! pending to evaluated to accepted or rejected within one call. The caller
//! decides what to do with an accepted opportunity.
//!
//! # Scoring
//!
//! - **Opportunity attack**: base value, reservation penalty, damage, kill
//!   and high-threat bonuses, focus-fire bonus, then multiplied by hit chance.
//! - **Defensive**: prevented damage scaled by how hurt the protected
//!   combatant is, plus survival and low-HP bonuses. Preventing death fires
//!   the reaction regardless of the threshold.
//! - **Counter**: estimated value of the countered effect, plus a bonus when
//!   it targets the reactor's side.

use rand::Rng;

use super::{
    ReactionCandidate, ReactionConfig, ReactionKind, ReactionOpportunity, ReactionPolicy,
    TriggerEvent,
};
use crate::breakdown::{Breakdown, ScoreSheet};
use crate::config::{AiConfig, ReactionTuning, ThreatFieldConfig};
use crate::context::CombatContext;
use crate::profile::{BehaviorProfile, weights};
use crate::scoring::hit_chance;
use crate::state::Combatant;
use crate::threat::threat_posed_by;

/// Estimates what countering an effect is worth.
///
/// Spell databases plug in here; the evaluator only provides the slot.
pub trait EffectEstimator {
    fn estimate(&self, event: &TriggerEvent) -> f32;
}

/// Takes the event's own value as the effect estimate.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventValueEstimator;

impl EffectEstimator for EventValueEstimator {
    fn estimate(&self, event: &TriggerEvent) -> f32 {
        if event.value.is_finite() { event.value.max(0.0) } else { 0.0 }
    }
}

/// Scores reaction candidates for one reactor.
pub struct ReactionEvaluator<'a> {
    profile: &'a BehaviorProfile,
    config: &'a ReactionConfig,
    tuning: &'a ReactionTuning,
    threat: &'a ThreatFieldConfig,
    estimator: &'a dyn EffectEstimator,
}

impl<'a> ReactionEvaluator<'a> {
    pub fn new(profile: &'a BehaviorProfile, config: &'a ReactionConfig, ai: &'a AiConfig) -> Self {
        Self {
            profile,
            config,
            tuning: &ai.reaction,
            threat: &ai.threat,
            estimator: &EventValueEstimator,
        }
    }

    pub fn with_estimator(mut self, estimator: &'a dyn EffectEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    fn sheet(&self) -> ScoreSheet {
        ScoreSheet::new(self.tuning.record_breakdown)
    }

    // ========================================================================
    // Evaluators
    // ========================================================================

    /// Scores an opportunity attack by `reactor` on `target`.
    ///
    /// # Arguments
    ///
    /// * `threat_level` - Threat the target poses to the reactor's side
    pub fn evaluate_opportunity_attack(
        &self,
        event: &TriggerEvent,
        candidate: &ReactionCandidate,
        reactor: &Combatant,
        target: &Combatant,
        threat_level: f32,
    ) -> ReactionOpportunity {
        let mut opportunity =
            ReactionOpportunity::pending(event.kind, reactor.id.clone(), target.id.clone(), candidate);

        if self.config.is_ignored(&target.id) {
            opportunity.decide(false, format!("{} is ignored", target.id));
            return opportunity;
        }
        if !target.is_available() {
            opportunity.decide(false, format!("{} is no longer in the fight", target.id));
            return opportunity;
        }

        let p = self.profile;
        let t = self.tuning;
        let expected = reactor.average_damage.max(0.0);
        let hit = hit_chance(reactor.attack_bonus, target.armor_class);
        opportunity.expected_damage = expected;
        opportunity.hit_chance = hit;
        opportunity.threat_level = threat_level;

        let mut sheet = self.sheet();
        sheet.add("base", t.opportunity_base_value * p.weight(weights::OPPORTUNITY_ATTACK));
        if self.config.is_reserved() {
            sheet.add("reserved", -t.reserved_penalty);
        }
        sheet.add("damage", expected * t.damage_factor * p.weight(weights::DAMAGE));
        if expected >= target.hp.current as f32 {
            opportunity.would_kill = true;
            sheet.add("kill", t.kill_bonus);
        }
        if threat_level > t.high_threat_threshold {
            sheet.add("high_threat", t.high_threat_bonus);
        }
        let hp_fraction = target.hp_fraction();
        if p.focus_fire && hp_fraction < t.focus_fire_hp_fraction {
            sheet.add("focus_fire", t.low_hp_focus_bonus * (1.0 - hp_fraction));
        }
        self.apply_trigger_weight(&mut sheet, event);
        sheet.scale("hit_chance", hit);

        let (score, breakdown) = sheet.finish();
        opportunity.scored(score, breakdown);

        let (react, rule) = if self.config.always_react_to_opportunity {
            (score > 0.0, "always reacts to openings".to_owned())
        } else {
            (
                score >= self.config.min_score,
                format!("threshold {:.1}", self.config.min_score),
            )
        };
        let kill_note = if opportunity.would_kill { ", would kill" } else { "" };
        opportunity.decide(
            react,
            format!(
                "opportunity attack on {}: score {:.1} ({}){}",
                target.id, score, rule, kill_note
            ),
        );
        opportunity
    }

    /// Scores a defensive reaction protecting `protected` (the reactor or an ally).
    pub fn evaluate_defensive(
        &self,
        event: &TriggerEvent,
        candidate: &ReactionCandidate,
        reactor: &Combatant,
        protected: &Combatant,
    ) -> ReactionOpportunity {
        let mut opportunity =
            ReactionOpportunity::pending(event.kind, reactor.id.clone(), event.source.clone(), candidate);

        let t = self.tuning;
        let defensive_weight = self.profile.weight(weights::SELF_PRESERVATION);
        let incoming = event.severity(t);
        let hp_fraction = protected.hp_fraction();
        let prevents_death = incoming > 0.0 && protected.hp.current as f32 - incoming <= 0.0;
        opportunity.expected_damage = incoming;
        opportunity.prevents_death = prevents_death;

        let mut sheet = self.sheet();
        sheet.add("damage_prevented", incoming * (2.0 - hp_fraction) * defensive_weight);
        if prevents_death {
            sheet.add("survival", t.survival_bonus * defensive_weight);
        }
        if hp_fraction < t.defensive_low_hp_fraction {
            sheet.add("low_hp", t.defensive_low_hp_bonus * defensive_weight);
        }
        if self.config.breaks_reservation(event.ability.as_deref()) {
            sheet.add("reserved", -t.reserved_penalty);
        }
        self.apply_trigger_weight(&mut sheet, event);

        let (score, breakdown) = sheet.finish();
        opportunity.scored(score, breakdown);

        let react = prevents_death || score >= self.config.min_score;
        let reason = if prevents_death {
            "prevents death".to_owned()
        } else {
            format!("threshold {:.1}", self.config.min_score)
        };
        opportunity.decide(
            react,
            format!(
                "{} protecting {} from {:.1} damage: score {:.1} ({})",
                candidate.id, protected.id, incoming, score, reason
            ),
        );
        opportunity
    }

    /// Scores countering the effect behind `event`.
    ///
    /// # Arguments
    ///
    /// * `targets_friendly` - The effect is aimed at the reactor or its allies
    pub fn evaluate_counter(
        &self,
        event: &TriggerEvent,
        candidate: &ReactionCandidate,
        reactor: &Combatant,
        targets_friendly: bool,
    ) -> ReactionOpportunity {
        let mut opportunity =
            ReactionOpportunity::pending(event.kind, reactor.id.clone(), event.source.clone(), candidate);

        let mut sheet = self.sheet();
        sheet.add("effect_value", self.estimator.estimate(event));
        if targets_friendly {
            sheet.add("protects_allies", self.tuning.counter_ally_bonus);
        }
        self.apply_trigger_weight(&mut sheet, event);

        let (score, breakdown) = sheet.finish();
        opportunity.scored(score, breakdown);
        let react = score >= self.config.min_score;
        opportunity.decide(
            react,
            format!(
                "counter {} from {}: score {:.1} (threshold {:.1})",
                event.ability.as_deref().unwrap_or("effect"),
                event.source,
                score,
                self.config.min_score
            ),
        );
        opportunity
    }

    fn apply_trigger_weight(&self, sheet: &mut ScoreSheet, event: &TriggerEvent) {
        let weight = self.config.trigger_weight(event.kind);
        if weight != 1.0 {
            sheet.scale("trigger_weight", weight);
        }
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Effective policy: the candidate's own, else the config's for its id.
    pub fn policy_of(&self, candidate: &ReactionCandidate) -> ReactionPolicy {
        match candidate.policy {
            ReactionPolicy::Evaluate => self.config.policy_for(&candidate.id),
            policy => policy,
        }
    }

    /// Evaluates one candidate, routing by its reaction kind.
    ///
    /// # Returns
    ///
    /// `None` when the candidate's policy is [`ReactionPolicy::Never`].
    pub fn evaluate<C, R>(
        &self,
        ctx: &C,
        reactor: &Combatant,
        event: &TriggerEvent,
        candidate: &ReactionCandidate,
        rng: &mut R,
    ) -> Option<ReactionOpportunity>
    where
        C: CombatContext + ?Sized,
        R: Rng + ?Sized,
    {
        let opportunity = match self.policy_of(candidate) {
            ReactionPolicy::Never => {
                tracing::debug!("{}: {} filtered by policy", reactor.id, candidate.id);
                return None;
            }
            ReactionPolicy::Always => self.shortcut(event, candidate, reactor, true, "always"),
            ReactionPolicy::Random => {
                let probability = self.tuning.random_policy_probability.clamp(0.0, 1.0);
                let fire = rng.gen_bool(f64::from(probability));
                self.shortcut(event, candidate, reactor, fire, "random")
            }
            ReactionPolicy::Evaluate => self.route(ctx, reactor, event, candidate),
        };

        tracing::debug!(
            "{} {} on {}: {:.2} [{}] -> {}",
            reactor.id,
            candidate.id,
            event.kind,
            opportunity.score,
            opportunity.breakdown,
            opportunity.status
        );
        Some(opportunity)
    }

    fn route<C>(
        &self,
        ctx: &C,
        reactor: &Combatant,
        event: &TriggerEvent,
        candidate: &ReactionCandidate,
    ) -> ReactionOpportunity
    where
        C: CombatContext + ?Sized,
    {
        match candidate.kind {
            ReactionKind::OpportunityAttack => match ctx.combatant(&event.source) {
                Some(target) => {
                    let mut side = ctx.allies_of(&reactor.id);
                    side.push(reactor);
                    let threat = threat_posed_by(self.threat, target, side);
                    self.evaluate_opportunity_attack(event, candidate, reactor, target, threat)
                }
                None => self.unresolved(event, candidate, reactor, "trigger source"),
            },
            ReactionKind::Defensive => {
                let protected = if event.kind.targets_ally() {
                    event.affected.as_ref().and_then(|id| ctx.combatant(id))
                } else {
                    Some(reactor)
                };
                match protected {
                    Some(protected) => {
                        self.evaluate_defensive(event, candidate, reactor, protected)
                    }
                    None => self.unresolved(event, candidate, reactor, "protected ally"),
                }
            }
            ReactionKind::Counter => {
                let targets_friendly = event
                    .affected
                    .as_ref()
                    .and_then(|id| ctx.combatant(id))
                    .is_some_and(|affected| {
                        affected.id == reactor.id || affected.faction.is_allied_with(&reactor.faction)
                    });
                self.evaluate_counter(event, candidate, reactor, targets_friendly)
            }
        }
    }

    fn shortcut(
        &self,
        event: &TriggerEvent,
        candidate: &ReactionCandidate,
        reactor: &Combatant,
        fire: bool,
        policy: &str,
    ) -> ReactionOpportunity {
        let mut opportunity =
            ReactionOpportunity::pending(event.kind, reactor.id.clone(), event.source.clone(), candidate);
        let score = if fire { self.tuning.always_policy_score } else { 0.0 };
        let mut breakdown = Breakdown::new(self.tuning.record_breakdown);
        breakdown.push(&format!("policy_{policy}"), score);
        opportunity.scored(score, breakdown);
        opportunity.decide(fire, format!("{} policy {}", candidate.id, policy));
        opportunity
    }

    fn unresolved(
        &self,
        event: &TriggerEvent,
        candidate: &ReactionCandidate,
        reactor: &Combatant,
        what: &str,
    ) -> ReactionOpportunity {
        let mut opportunity =
            ReactionOpportunity::pending(event.kind, reactor.id.clone(), event.source.clone(), candidate);
        opportunity.decide(false, format!("{what} could not be resolved"));
        opportunity
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Picks the accepted opportunity to act on.
    ///
    /// Highest score wins, earlier entries win ties. With `prefer_defensive`
    /// an accepted defensive opportunity is taken before anything else.
    pub fn select_best(&self, opportunities: Vec<ReactionOpportunity>) -> Option<ReactionOpportunity> {
        let accepted: Vec<ReactionOpportunity> =
            opportunities.into_iter().filter(|o| o.is_accepted()).collect();

        if self.config.prefer_defensive {
            if let Some(defensive) = best_by_score(
                accepted.iter().filter(|o| o.kind == ReactionKind::Defensive),
            ) {
                return Some(defensive.clone());
            }
        }
        best_by_score(accepted.iter()).cloned()
    }

    /// Evaluates every candidate and selects the best accepted one.
    pub fn decide<C, R>(
        &self,
        ctx: &C,
        reactor: &Combatant,
        event: &TriggerEvent,
        candidates: &[ReactionCandidate],
        rng: &mut R,
    ) -> Option<ReactionOpportunity>
    where
        C: CombatContext + ?Sized,
        R: Rng + ?Sized,
    {
        let evaluated = candidates
            .iter()
            .filter_map(|candidate| self.evaluate(ctx, reactor, event, candidate, rng))
            .collect();
        self.select_best(evaluated)
    }
}

fn best_by_score<'o, I>(opportunities: I) -> Option<&'o ReactionOpportunity>
where
    I: Iterator<Item = &'o ReactionOpportunity>,
{
    opportunities.fold(None, |best, candidate| match best {
        Some(current) if current.score >= candidate.score => Some(current),
        _ => Some(candidate),
    })
}

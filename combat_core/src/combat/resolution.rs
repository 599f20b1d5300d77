//! Round resolution - apply two simultaneous moves to two creatures

use crate::config::{CombatConstants, HitProfile};
use crate::damage::{calculate_hit_damage, roll_base_damage, HitInput};
use crate::moves::{Move, MoveResult, MoveType};
use creature_core::Creature;
use rand::Rng;
use tracing::debug;

/// Resolves combat rounds under a fixed set of constants
#[derive(Debug, Clone, Default)]
pub struct CombatEngine {
    constants: CombatConstants,
}

enum HitOutcome {
    Dodged,
    Landed {
        damage: u32,
        is_critical: bool,
        defended: bool,
    },
}

impl CombatEngine {
    pub fn new(constants: CombatConstants) -> Self {
        CombatEngine { constants }
    }

    pub fn constants(&self) -> &CombatConstants {
        &self.constants
    }

    /// Resolve one full round (immutable-RNG API)
    ///
    /// See [`CombatEngine::execute_moves_with_rng`].
    pub fn execute_moves(
        &self,
        creature1: &mut Creature,
        move1: &Move,
        creature2: &mut Creature,
        move2: &Move,
    ) -> (MoveResult, MoveResult) {
        let mut rng = rand::thread_rng();
        self.execute_moves_with_rng(creature1, move1, creature2, move2, &mut rng)
    }

    /// Resolve one full round with a provided RNG (for deterministic testing)
    ///
    /// 1. The faster creature acts first; ties go to `creature1`
    /// 2. The second creature acts only if it survived the first move
    /// 3. Results come back in argument order, not resolution order
    pub fn execute_moves_with_rng(
        &self,
        creature1: &mut Creature,
        move1: &Move,
        creature2: &mut Creature,
        move2: &Move,
        rng: &mut impl Rng,
    ) -> (MoveResult, MoveResult) {
        if creature1.base_stats.speed() >= creature2.base_stats.speed() {
            let first = self.execute_single_move(creature1, move1, creature2, move2, rng);
            let second = self.execute_if_alive(creature2, move2, creature1, move1, rng);
            (first, second)
        } else {
            let first = self.execute_single_move(creature2, move2, creature1, move1, rng);
            let second = self.execute_if_alive(creature1, move1, creature2, move2, rng);
            (second, first)
        }
    }

    fn execute_if_alive(
        &self,
        actor: &mut Creature,
        actor_move: &Move,
        opponent: &mut Creature,
        opponent_move: &Move,
        rng: &mut impl Rng,
    ) -> MoveResult {
        if actor.is_alive() {
            self.execute_single_move(actor, actor_move, opponent, opponent_move, rng)
        } else {
            debug!(creature = %actor.name, "defeated before acting");
            MoveResult::failed(
                actor_move.clone(),
                format!("{} was defeated before acting!", actor.name),
            )
        }
    }

    /// Execute one creature's move against its opponent
    ///
    /// The defender's declared move decides whether it is defending.
    pub fn execute_single_move(
        &self,
        attacker: &mut Creature,
        attacker_move: &Move,
        defender: &mut Creature,
        defender_move: &Move,
        rng: &mut impl Rng,
    ) -> MoveResult {
        let result = match attacker_move.move_type() {
            MoveType::Attack => {
                self.execute_attack(attacker, attacker_move, defender, defender_move, rng)
            }
            MoveType::Defend => self.execute_defend(attacker, attacker_move),
            MoveType::Special => {
                self.execute_special(attacker, attacker_move, defender, defender_move, rng)
            }
            MoveType::Unknown => MoveResult::failed(attacker_move.clone(), "Unknown move type"),
        };

        debug!(
            attacker = %attacker.name,
            move_type = %attacker_move.move_type(),
            success = result.success,
            damage = result.damage_dealt,
            dodged = result.was_dodged,
            critical = result.was_critical,
            "move resolved"
        );
        result
    }

    fn execute_attack(
        &self,
        attacker: &Creature,
        attacker_move: &Move,
        defender: &mut Creature,
        defender_move: &Move,
        rng: &mut impl Rng,
    ) -> MoveResult {
        let profile = self.constants.attack_profile();
        match self.resolve_hit(&profile, attacker, defender, defender_move, rng) {
            HitOutcome::Dodged => MoveResult::dodged(
                attacker_move.clone(),
                format!("{}'s attack missed! {} dodged!", attacker.name, defender.name),
            ),
            HitOutcome::Landed {
                damage,
                is_critical,
                defended,
            } => MoveResult {
                damage_dealt: damage,
                was_critical: is_critical,
                was_defended: defended,
                ..MoveResult::succeeded(
                    attacker_move.clone(),
                    format!(
                        "{} attacks {} for {} damage!{}",
                        attacker.name,
                        defender.name,
                        damage,
                        annotations(is_critical, defended)
                    ),
                )
            },
        }
    }

    fn execute_defend(&self, attacker: &mut Creature, attacker_move: &Move) -> MoveResult {
        if attacker.defend_uses_remaining == 0 {
            return MoveResult::failed(
                attacker_move.clone(),
                format!("{} has no defend uses remaining!", attacker.name),
            );
        }

        attacker.defend_uses_remaining -= 1;

        MoveResult::succeeded(
            attacker_move.clone(),
            format!(
                "{} takes a defensive stance! ({} uses left)",
                attacker.name, attacker.defend_uses_remaining
            ),
        )
    }

    fn execute_special(
        &self,
        attacker: &mut Creature,
        attacker_move: &Move,
        defender: &mut Creature,
        defender_move: &Move,
        rng: &mut impl Rng,
    ) -> MoveResult {
        if attacker.special_uses_remaining == 0 {
            return MoveResult::failed(
                attacker_move.clone(),
                format!("{} has no special uses remaining!", attacker.name),
            );
        }

        // Spent even if the special is dodged
        attacker.special_uses_remaining -= 1;

        let profile = self.constants.special_profile();
        match self.resolve_hit(&profile, attacker, defender, defender_move, rng) {
            HitOutcome::Dodged => MoveResult::dodged(
                attacker_move.clone(),
                format!(
                    "{}'s special ability missed! {} dodged!",
                    attacker.name, defender.name
                ),
            ),
            HitOutcome::Landed {
                damage,
                is_critical,
                defended,
            } => MoveResult {
                damage_dealt: damage,
                was_critical: is_critical,
                was_defended: defended,
                ..MoveResult::succeeded(
                    attacker_move.clone(),
                    format!(
                        "{} uses special ability on {} for {} damage!{}",
                        attacker.name,
                        defender.name,
                        damage,
                        annotations(is_critical, defended)
                    ),
                )
            },
        }
    }

    /// Dodge roll, base roll, crit roll, mitigation, then apply to the defender
    fn resolve_hit(
        &self,
        profile: &HitProfile,
        attacker: &Creature,
        defender: &mut Creature,
        defender_move: &Move,
        rng: &mut impl Rng,
    ) -> HitOutcome {
        let dodge_chance = defender.dodge_chance() * profile.dodge_factor;
        if rng.gen::<f64>() < dodge_chance {
            return HitOutcome::Dodged;
        }

        let base_roll = roll_base_damage(&self.constants, rng);
        let crit_chance = attacker.crit_chance() * profile.crit_chance_factor;
        let is_critical = rng.gen::<f64>() < crit_chance;

        // Checks the defender's remaining uses without spending one
        let defending = defender_move.move_type() == MoveType::Defend
            && defender.defend_uses_remaining > 0;

        let input = HitInput {
            base_roll,
            attacker_strength: attacker.base_stats.strength(),
            is_critical,
            defender_defending: defending,
            defender_defense_percentage: defender.defense_percentage(),
        };
        let damage = calculate_hit_damage(&input, profile, self.constants.damage.crit_multiplier);
        let actual = defender.take_damage(damage);

        HitOutcome::Landed {
            damage: actual,
            is_critical,
            defended: defending,
        }
    }
}

fn annotations(is_critical: bool, defended: bool) -> String {
    let mut text = String::new();
    if is_critical {
        text.push_str(" Critical hit!");
    }
    if defended {
        text.push_str(" (Defended)");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use creature_core::{CreatureType, Stat};
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Never dodges or crits, always rolls the lowest base damage
    struct SteadyRng;

    impl RngCore for SteadyRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    /// Replays a fixed sequence for float rolls, lowest base damage for integer rolls
    struct ScriptedRng {
        floats: Vec<u64>,
        next: usize,
    }

    impl ScriptedRng {
        fn new(floats: &[u64]) -> Self {
            ScriptedRng {
                floats: floats.to_vec(),
                next: 0,
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            let value = self.floats[self.next % self.floats.len()];
            self.next += 1;
            value
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn creature(name: &str, creature_type: CreatureType) -> Creature {
        Creature::create_with_biases(name, creature_type, None, false).unwrap()
    }

    #[test]
    fn test_execute_moves_typical() {
        let engine = CombatEngine::default();
        let mut dragon = creature("Dragon", CreatureType::Dragon);
        let mut robot = creature("Robot", CreatureType::Robot);
        let attack = Move::attack(dragon.id);
        let defend = Move::defend(robot.id);

        let (r1, r2) = engine.execute_moves(&mut dragon, &attack, &mut robot, &defend);

        assert_eq!(r1.mv, attack);
        assert_eq!(r2.mv, defend);
        assert!(r2.success);
        assert_eq!(robot.defend_uses_remaining, 2);
    }

    #[test]
    fn test_faster_creature_acts_first() {
        let engine = CombatEngine::default();
        let mut slow = creature("Slow", CreatureType::Dragon); // speed 7
        let mut fast = creature("Fast", CreatureType::Beyblade); // speed 16
        slow.current_hp = 1;
        let slow_move = Move::special(slow.id);
        let fast_move = Move::attack(fast.id);

        let (slow_result, fast_result) = engine.execute_moves_with_rng(
            &mut slow,
            &slow_move,
            &mut fast,
            &fast_move,
            &mut SteadyRng,
        );

        assert!(fast_result.success);
        assert_eq!(fast_result.mv, fast_move);
        assert!(!slow_result.success);
        assert!(slow_result.message.contains("defeated before acting"));
        assert_eq!(slow_result.mv, slow_move);
        // The queued special was never spent
        assert_eq!(slow.special_uses_remaining, 1);
        assert_eq!(fast.current_hp, fast.max_hp);
    }

    #[test]
    fn test_speed_tie_favors_first_argument() {
        let engine = CombatEngine::default();
        let mut first = creature("First", CreatureType::Jacob);
        let mut second = creature("Second", CreatureType::Jacob);
        first.current_hp = 1;
        second.current_hp = 1;
        let m1 = Move::attack(first.id);
        let m2 = Move::attack(second.id);

        let (r1, r2) =
            engine.execute_moves_with_rng(&mut first, &m1, &mut second, &m2, &mut SteadyRng);

        assert!(r1.success);
        assert_eq!(r1.damage_dealt, 1);
        assert!(!second.is_alive());
        assert!(!r2.success);
        assert!(first.is_alive());
    }

    #[test]
    fn test_exact_attack_damage() {
        let engine = CombatEngine::default();
        let mut jacob = creature("Jacob", CreatureType::Jacob); // strength 10
        let mut robot = creature("Robot", CreatureType::Robot); // defense 20
        let attack = Move::attack(jacob.id);
        let defend = Move::defend(robot.id);
        robot.defend_uses_remaining = 0;

        let result =
            engine.execute_single_move(&mut jacob, &attack, &mut robot, &defend, &mut SteadyRng);

        // floor(5 * 1.0) = 5, floor(5 * 0.5) = 2; defend ignored with no uses left
        assert!(result.success);
        assert!(!result.was_defended);
        assert_eq!(result.damage_dealt, 2);
        assert_eq!(robot.current_hp, robot.max_hp - 2);
        assert!(result.message.contains("for 2 damage"));
    }

    #[test]
    fn test_attack_critical_hit() {
        let engine = CombatEngine::default();
        let mut jacob = creature("Jacob", CreatureType::Jacob);
        let mut robot = creature("Robot", CreatureType::Robot);
        let attack = Move::attack(jacob.id);
        let idle = Move::attack(robot.id);
        // no dodge, then crit
        let mut rng = ScriptedRng::new(&[u64::MAX, 0]);

        let result = engine.execute_single_move(&mut jacob, &attack, &mut robot, &idle, &mut rng);

        // 5 -> crit floor(7.5) = 7 -> floor(7 * 0.5) = 3
        assert!(result.was_critical);
        assert_eq!(result.damage_dealt, 3);
        assert!(result.message.contains("Critical hit!"));
    }

    #[test]
    fn test_attack_move_defended() {
        let engine = CombatEngine::default();
        let mut attacker = creature("Brute", CreatureType::Minotaur); // strength 13
        let mut defender = creature("Guard", CreatureType::Jacob);
        let attack = Move::attack(attacker.id);
        let defend = Move::defend(defender.id);

        let result = engine.execute_single_move(
            &mut attacker,
            &attack,
            &mut defender,
            &defend,
            &mut SteadyRng,
        );

        // floor(5 * 1.3) = 6, floor(6 * 0.3) = 1
        assert!(result.was_defended);
        assert_eq!(result.damage_dealt, 1);
        assert!(result.message.contains("(Defended)"));
        // Defending against a hit does not spend a use
        assert_eq!(defender.defend_uses_remaining, 3);
    }

    #[test]
    fn test_defend_resource_limit() {
        let engine = CombatEngine::default();
        let mut gnome = creature("Gnome", CreatureType::Gnome);
        let mut foe = creature("Foe", CreatureType::Robot);
        let defend = Move::defend(gnome.id);
        let attack = Move::attack(foe.id);

        for expected in [2, 1, 0] {
            let result =
                engine.execute_single_move(&mut gnome, &defend, &mut foe, &attack, &mut SteadyRng);
            assert!(result.success);
            assert_eq!(gnome.defend_uses_remaining, expected);
        }

        let result =
            engine.execute_single_move(&mut gnome, &defend, &mut foe, &attack, &mut SteadyRng);
        assert!(!result.success);
        assert!(result.message.to_lowercase().contains("no defend uses"));
        assert_eq!(gnome.defend_uses_remaining, 0);
    }

    #[test]
    fn test_special_resource_limit() {
        let engine = CombatEngine::default();
        let mut kraken = creature("Kraken", CreatureType::Kraken);
        let mut foe = creature("Foe", CreatureType::Jacob);
        let special = Move::special(kraken.id);
        let attack = Move::attack(foe.id);

        let result =
            engine.execute_single_move(&mut kraken, &special, &mut foe, &attack, &mut SteadyRng);
        assert!(result.success);
        assert!(result.damage_dealt >= 2);
        assert_eq!(kraken.special_uses_remaining, 0);

        let hp_before = foe.current_hp;
        let result =
            engine.execute_single_move(&mut kraken, &special, &mut foe, &attack, &mut SteadyRng);
        assert!(!result.success);
        assert!(result.message.to_lowercase().contains("no special uses"));
        assert_eq!(kraken.special_uses_remaining, 0);
        assert_eq!(foe.current_hp, hp_before);
    }

    #[test]
    fn test_dodge_with_lucky_roll() {
        let engine = CombatEngine::default();
        let mut attacker = creature("Swing", CreatureType::Minotaur);
        let mut defender = creature("Dancer", CreatureType::Beyblade);
        let attack = Move::attack(attacker.id);
        let idle = Move::attack(defender.id);

        let result = engine.execute_single_move(
            &mut attacker,
            &attack,
            &mut defender,
            &idle,
            &mut ScriptedRng::new(&[0]),
        );

        assert!(result.success);
        assert!(result.was_dodged);
        assert_eq!(result.damage_dealt, 0);
        assert_eq!(defender.current_hp, defender.max_hp);
        assert!(result.message.contains("dodged"));
    }

    #[test]
    fn test_special_dodge_still_spends_use() {
        let engine = CombatEngine::default();
        let mut attacker = creature("Caster", CreatureType::Cthulu);
        let mut defender = creature("Dancer", CreatureType::Beyblade);
        let special = Move::special(attacker.id);
        let idle = Move::attack(defender.id);

        let result = engine.execute_single_move(
            &mut attacker,
            &special,
            &mut defender,
            &idle,
            &mut ScriptedRng::new(&[0]),
        );

        assert!(result.was_dodged);
        assert_eq!(attacker.special_uses_remaining, 0);
    }

    #[test]
    fn test_dodge_occurs_at_max_speed() {
        let engine = CombatEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let mut attacker = creature("Swing", CreatureType::Minotaur);
        let mut defender = creature("Dancer", CreatureType::Beyblade);
        defender.base_stats.set(Stat::Speed, 20);
        let attack = Move::attack(attacker.id);
        let idle = Move::attack(defender.id);

        let dodged = (0..200).any(|_| {
            defender.full_heal();
            engine
                .execute_single_move(&mut attacker, &attack, &mut defender, &idle, &mut rng)
                .was_dodged
        });
        assert!(dodged);
    }

    #[test]
    fn test_unknown_move_type() {
        let engine = CombatEngine::default();
        let mut a = creature("A", CreatureType::Jacob);
        let mut b = creature("B", CreatureType::Jacob);
        let bad = Move::new(MoveType::Unknown, a.id);
        let attack = Move::attack(b.id);
        let before = (a.clone(), b.clone());

        let result = engine.execute_single_move(&mut a, &bad, &mut b, &attack, &mut SteadyRng);

        assert!(!result.success);
        assert!(result.message.to_lowercase().contains("unknown move type"));
        assert_eq!((a, b), before);
    }

    #[test]
    fn test_unknown_move_does_not_block_opponent() {
        let engine = CombatEngine::default();
        let mut a = creature("A", CreatureType::Jacob);
        let mut b = creature("B", CreatureType::Jacob);
        let bad = Move::new(MoveType::Unknown, a.id);
        let attack = Move::attack(b.id);

        let (ra, rb) = engine.execute_moves_with_rng(&mut a, &bad, &mut b, &attack, &mut SteadyRng);

        assert!(!ra.success);
        assert!(rb.success);
        assert!(a.current_hp < a.max_hp);
    }

    #[test]
    fn test_damage_floors_over_many_rounds() {
        let engine = CombatEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..500 {
            let mut weak = creature("Weak", CreatureType::Gnome);
            weak.base_stats.set(Stat::Strength, 1);
            let mut wall = creature("Wall", CreatureType::Robot);
            let attack = Move::attack(weak.id);
            let special = Move::special(weak.id);
            let defend = Move::defend(wall.id);

            let result =
                engine.execute_single_move(&mut weak, &attack, &mut wall, &defend, &mut rng);
            assert!(result.was_dodged || result.damage_dealt >= 1);
            let result =
                engine.execute_single_move(&mut weak, &special, &mut wall, &defend, &mut rng);
            assert!(result.was_dodged || result.damage_dealt >= 2);
        }
    }
}

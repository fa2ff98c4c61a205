//! Random source for hand dealing and opponent play
//!
//! The engine never touches an ambient RNG. Everything random goes through
//! `BattleRng`, so tests can swap in a seeded ChaCha stream or a scripted fake.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait BattleRng {
    /// [0, 1) 구간의 균등 분포 값
    fn next_f32(&mut self) -> f32;

    /// [0, len) 구간의 균등 인덱스. `len`은 1 이상이어야 한다
    fn choose_index(&mut self, len: usize) -> usize;

    /// 제자리 셔플. 기본 구현은 `choose_index`만으로 동작하는 Fisher-Yates
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.choose_index(i + 1);
            items.swap(i, j);
        }
    }
}

impl<R: RngCore> BattleRng for R {
    fn next_f32(&mut self) -> f32 {
        self.gen::<f32>()
    }

    fn choose_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.gen_range(0..len)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        SliceRandom::shuffle(items, self);
    }
}

/// 시드 고정 RNG (리플레이/테스트용)
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// OS 엔트로피 기반 RNG (실제 매치용)
pub fn from_entropy() -> ChaCha8Rng {
    ChaCha8Rng::from_entropy()
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::BattleRng;
    use std::collections::VecDeque;

    /// 미리 정한 값을 순서대로 돌려주는 테스트용 RNG. 값이 떨어지면 0을 돌려준다
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedRng {
        floats: VecDeque<f32>,
        indices: VecDeque<usize>,
    }

    impl ScriptedRng {
        pub(crate) fn new(floats: &[f32], indices: &[usize]) -> Self {
            Self { floats: floats.iter().copied().collect(), indices: indices.iter().copied().collect() }
        }
    }

    impl BattleRng for ScriptedRng {
        fn next_f32(&mut self) -> f32 {
            self.floats.pop_front().unwrap_or(0.0)
        }

        fn choose_index(&mut self, len: usize) -> usize {
            self.indices.pop_front().unwrap_or(0).min(len.saturating_sub(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = seeded(12345);
        let mut b = seeded(12345);
        for _ in 0..100 {
            assert_eq!(a.choose_index(17), b.choose_index(17));
        }
    }

    #[test]
    fn test_choose_index_in_bounds() {
        let mut rng = seeded(42);
        for len in 1..20 {
            assert!(rng.choose_index(len) < len);
        }
        for _ in 0..100 {
            let f = rng.next_f32();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = seeded(7);
        let mut items = [1, 2, 3, 4, 5, 6, 7, 8];
        BattleRng::shuffle(&mut rng, &mut items);
        let mut sorted = items;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_shuffle_matches_slice_random() {
        let mut ours = [10, 20, 30, 40, 50, 60];
        let mut theirs = ours;
        BattleRng::shuffle(&mut seeded(31), &mut ours);
        SliceRandom::shuffle(&mut theirs[..], &mut seeded(31));
        assert_eq!(ours, theirs);
    }

    #[test]
    fn test_scripted_shuffle_uses_choose_index() {
        // i = 3, 2, 1 순서로 choose_index(i + 1) 호출
        let mut rng = scripted::ScriptedRng::new(&[], &[0, 0, 0]);
        let mut items = [1, 2, 3, 4];
        rng.shuffle(&mut items);
        assert_eq!(items, [2, 3, 4, 1]);
    }
}

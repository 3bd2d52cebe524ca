//! Block categories and the priority ladder
//!
//! Every run of two or more stones falls into one block category by its
//! length and number of walls. A side's tally of blocks is converted to a
//! single score by walking the ladder from the strongest threat down and
//! taking the first rung whose count is exceeded. Scores are not summed: one
//! dominant threat outranks any number of weaker ones.

/// Fixed scores used by evaluation and search
pub struct PatternScore;

impl PatternScore {
    /// Exactly five in a row, as seen by search (terminal)
    pub const WIN: i32 = 1_000;
    /// Top of the ladder scale
    pub const MAX: i32 = 100;
    /// Ladder scores above this are treated as almost terminal
    pub const NEAR_CERTAIN: i32 = 90;
}

/// Tactical category of a run, by `(length, walls)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    /// Six or more in a row (not a win, but a strong asset)
    SixPlus,
    Five,
    /// `_OOOO_`
    OpenFour,
    /// `XOOOO_`
    FourOneWall,
    /// `XOOOOX`
    FourTwoWalls,
    OpenThree,
    ThreeOneWall,
    ThreeTwoWalls,
    OpenTwo,
    TwoOneWall,
    TwoTwoWalls,
}

impl Block {
    pub const COUNT: usize = 11;

    /// Categorize a run. Single stones carry no block.
    #[inline]
    pub fn classify(length: u8, walls: u8) -> Option<Block> {
        let block = match (length, walls.min(2)) {
            (6.., _) => Block::SixPlus,
            (5, _) => Block::Five,
            (4, 0) => Block::OpenFour,
            (4, 1) => Block::FourOneWall,
            (4, _) => Block::FourTwoWalls,
            (3, 0) => Block::OpenThree,
            (3, 1) => Block::ThreeOneWall,
            (3, _) => Block::ThreeTwoWalls,
            (2, 0) => Block::OpenTwo,
            (2, 1) => Block::TwoOneWall,
            (2, _) => Block::TwoTwoWalls,
            _ => return None,
        };
        Some(block)
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Per-side counts of runs by block category.
///
/// Rebuilt from scratch for every evaluated board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockTally {
    counts: [u32; Block::COUNT],
}

impl BlockTally {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, block: Block) {
        self.counts[block.index()] += 1;
    }

    #[inline]
    pub fn get(&self, block: Block) -> u32 {
        self.counts[block.index()]
    }

    /// Ladder score for this tally
    #[inline]
    pub fn score(&self) -> i32 {
        ladder_score(self)
    }
}

/// One ladder step: fires when the tally for `block` is greater than `more_than`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rung {
    pub block: Block,
    pub more_than: u32,
    pub score: i32,
}

const fn rung(block: Block, more_than: u32, score: i32) -> Rung {
    Rung {
        block,
        more_than,
        score,
    }
}

/// The priority ladder, strongest first. Order matters.
pub const LADDER: [Rung; 22] = [
    rung(Block::SixPlus, 0, 100),
    rung(Block::Five, 0, 100),
    rung(Block::OpenFour, 0, 100),
    rung(Block::FourOneWall, 1, 100),
    rung(Block::OpenThree, 2, 100),
    rung(Block::OpenThree, 1, 90),
    rung(Block::OpenThree, 0, 80),
    rung(Block::FourOneWall, 0, 70),
    rung(Block::FourTwoWalls, 4, 60),
    rung(Block::OpenTwo, 3, 60),
    rung(Block::FourTwoWalls, 3, 50),
    rung(Block::OpenTwo, 2, 50),
    rung(Block::FourTwoWalls, 2, 40),
    rung(Block::ThreeOneWall, 2, 40),
    rung(Block::OpenTwo, 1, 40),
    rung(Block::FourTwoWalls, 1, 30),
    rung(Block::ThreeOneWall, 0, 30),
    rung(Block::OpenTwo, 0, 30),
    rung(Block::FourTwoWalls, 0, 20),
    rung(Block::ThreeTwoWalls, 0, 20),
    rung(Block::TwoOneWall, 0, 20),
    rung(Block::TwoTwoWalls, 0, 10),
];

/// Score of the first rung the tally satisfies, or 0.
pub fn ladder_score(tally: &BlockTally) -> i32 {
    LADDER
        .iter()
        .find(|r| tally.get(r.block) > r.more_than)
        .map_or(0, |r| r.score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally_of(blocks: &[(Block, u32)]) -> BlockTally {
        let mut tally = BlockTally::new();
        for &(block, n) in blocks {
            for _ in 0..n {
                tally.add(block);
            }
        }
        tally
    }

    #[test]
    fn test_classify() {
        assert_eq!(Block::classify(1, 0), None);
        assert_eq!(Block::classify(2, 0), Some(Block::OpenTwo));
        assert_eq!(Block::classify(2, 2), Some(Block::TwoTwoWalls));
        assert_eq!(Block::classify(3, 1), Some(Block::ThreeOneWall));
        assert_eq!(Block::classify(4, 0), Some(Block::OpenFour));
        assert_eq!(Block::classify(4, 2), Some(Block::FourTwoWalls));
        assert_eq!(Block::classify(5, 2), Some(Block::Five));
        assert_eq!(Block::classify(6, 0), Some(Block::SixPlus));
        assert_eq!(Block::classify(9, 1), Some(Block::SixPlus));
    }

    #[test]
    fn test_ladder_is_monotonic() {
        for pair in LADDER.windows(2) {
            assert!(
                pair[0].score >= pair[1].score,
                "ladder must not climb: {:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
        assert!(LADDER.iter().all(|r| r.score > 0 && r.score <= PatternScore::MAX));
    }

    #[test]
    fn test_empty_tally_scores_zero() {
        assert_eq!(BlockTally::new().score(), 0);
    }

    #[test]
    fn test_first_match_wins() {
        // Many weak blocks never add up to a strong one
        let weak = tally_of(&[(Block::OpenTwo, 50), (Block::TwoTwoWalls, 50)]);
        assert_eq!(weak.score(), 60);

        let strong = tally_of(&[(Block::OpenFour, 1)]);
        assert_eq!(strong.score(), 100);
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(tally_of(&[(Block::OpenThree, 1)]).score(), 80);
        assert_eq!(tally_of(&[(Block::OpenThree, 2)]).score(), 90);
        assert_eq!(tally_of(&[(Block::OpenThree, 3)]).score(), 100);
        assert_eq!(tally_of(&[(Block::FourOneWall, 1)]).score(), 70);
        assert_eq!(tally_of(&[(Block::FourOneWall, 2)]).score(), 100);
        assert_eq!(tally_of(&[(Block::ThreeOneWall, 3)]).score(), 40);
        assert_eq!(tally_of(&[(Block::TwoTwoWalls, 1)]).score(), 10);
    }

    #[test]
    fn test_overline_tops_ladder() {
        assert_eq!(tally_of(&[(Block::SixPlus, 1)]).score(), PatternScore::MAX);
    }

    #[test]
    fn test_near_certain_only_for_top_threats() {
        let open_three = tally_of(&[(Block::OpenThree, 1)]);
        assert!(open_three.score() <= PatternScore::NEAR_CERTAIN);
        let open_four = tally_of(&[(Block::OpenFour, 1)]);
        assert!(open_four.score() > PatternScore::NEAR_CERTAIN);
    }
}

multiversx_sc::derive_imports!();

pub const Z_TABLE_SIZE: usize = 50;
pub const Z_TABLE_MAX_Z: u64 = 7;

/// Midpoint of the u64 range, the table value at z = 0.
pub const HALF: u64 = 1 << 63;

const MILLI: u128 = 1_000;

/// Cumulative probability thresholds (scaled to `u64::MAX`) for
/// `z = i * 7 / 50`, reference model: 1e10 theoretical max stake, 1e4
/// target committee. Regenerate with the `oracle-z-table` tool.
pub const Z_TABLE: [u64; Z_TABLE_SIZE] = [
    9223372036854775808,
    10225781901626763264,
    11232838423695937536,
    12201298642206066688,
    13114656369095311360,
    13959435096591919104,
    14725736635891343360,
    15407482930216398848,
    16002355431294916608,
    16511468971639547904,
    16938841540641601536,
    17290735201384497152,
    17574946001444696064,
    17800113417140975616,
    17975105261221431296,
    18108515390438998016,
    18208292274428082176,
    18281499268534091776,
    18334194104711485440,
    18371406506044465152,
    18397188871760926720,
    18414714940458637312,
    18426404123165952000,
    18434053619846410240,
    18438965432619771904,
    18442060157889482752,
    18443973465699104768,
    18445134222123220992,
    18445825260057950208,
    18446228978162089984,
    18446460440895569920,
    18446590673998778368,
    18446662587440244736,
    18446701559917492224,
    18446722288808198144,
    18446733109998796800,
    18446738654541883392,
    18446741442966941696,
    18446742819432747008,
    18446743486386657280,
    18446743803606865920,
    18446743951712352256,
    18446744019591655424,
    18446744050131730432,
    18446744063620730880,
    18446744069469673472,
    18446744071959517184,
    18446744073000103936,
    18446744073427073024,
    18446744073709551615,
];

/// Per-unit-of-stake committee selection probability, as a fraction.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub struct CommitteeParams {
    pub selection_probability_num: u64,
    pub selection_probability_den: u64,
}

impl Default for CommitteeParams {
    fn default() -> Self {
        CommitteeParams {
            selection_probability_num: 1,
            selection_probability_den: 1_000,
        }
    }
}

/// Largest selection denominator the u128 vote arithmetic can carry for any
/// u64 stake.
pub const MAX_SELECTION_DENOMINATOR: u64 = 1_000_000_000;

impl CommitteeParams {
    pub fn is_valid(&self) -> bool {
        self.selection_probability_den > 0
            && self.selection_probability_den <= MAX_SELECTION_DENOMINATOR
            && self.selection_probability_num <= self.selection_probability_den
    }
}

#[derive(Debug, PartialEq)]
pub enum CommitteeError {
    ZIndexOutOfRange,
    /// The draw does not fall between the claimed bucket's boundaries.
    WrongBucket,
    NoSeat,
}

/// Reads the 64-bit draw from the leading bytes of a VRF output.
pub fn draw_from_vrf(vrf_head: [u8; 8]) -> u64 {
    u64::from_be_bytes(vrf_head)
}

/// Mirrors the lower half of the range onto the upper half, so a single
/// one-sided table serves both signs of z.
pub fn fold_draw(q: u64) -> u64 {
    if q < HALF {
        HALF.saturating_add(HALF - q)
    } else {
        q
    }
}

pub fn bucket_contains(z_index: usize, adjusted: u64) -> bool {
    if z_index >= Z_TABLE_SIZE {
        return false;
    }
    adjusted <= Z_TABLE[z_index] && (z_index == 0 || adjusted > Z_TABLE[z_index - 1])
}

/// z-score of a bucket, in hundredths.
pub fn z_hundredths(z_index: usize) -> u128 {
    z_index as u128 * 100 / Z_TABLE_SIZE as u128 * Z_TABLE_MAX_Z as u128
}

pub fn isqrt(value: u128) -> u128 {
    if value < 2 {
        return value;
    }
    let mut x = value;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x
}

/// Committee votes a participant with `stake` is entitled to for draw `q`
/// in bucket `z_index`: `round(mean ± z * std)`, computed in milli-votes.
pub fn expected_vote_count(
    stake: u64,
    q: u64,
    z_index: usize,
    params: &CommitteeParams,
) -> Result<u64, CommitteeError> {
    if z_index >= Z_TABLE_SIZE {
        return Err(CommitteeError::ZIndexOutOfRange);
    }
    if !bucket_contains(z_index, fold_draw(q)) {
        return Err(CommitteeError::WrongBucket);
    }

    let num = params.selection_probability_num as u128;
    let den = params.selection_probability_den as u128;

    let mean_milli = stake as u128 * num * MILLI / den;
    let std_milli = isqrt(mean_milli * MILLI * (den - num) / den);
    let delta = z_hundredths(z_index) * std_milli / 100;

    let votes_milli = if q < HALF {
        mean_milli.saturating_sub(delta)
    } else {
        mean_milli + delta
    };
    let votes = ((votes_milli + MILLI / 2) / MILLI) as u64;

    if votes == 0 {
        return Err(CommitteeError::NoSeat);
    }
    Ok(votes)
}

/// A proposal wins once its votes reach `threshold_permille` of the expected
/// committee size `total_stake * p`.
pub fn quorum_reached(
    vote_count: u64,
    total_stake: u64,
    threshold_permille: u64,
    params: &CommitteeParams,
) -> bool {
    let lhs = vote_count as u128 * 1_000 * params.selection_probability_den as u128;
    let rhs = threshold_permille as u128
        * total_stake as u128
        * params.selection_probability_num as u128;
    lhs >= rhs
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: CommitteeParams = CommitteeParams {
        selection_probability_num: 1,
        selection_probability_den: 1_000,
    };

    #[test]
    fn table_is_monotone_and_bounded() {
        assert_eq!(Z_TABLE[0], HALF);
        assert_eq!(Z_TABLE[Z_TABLE_SIZE - 1], u64::MAX);
        assert!(Z_TABLE.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn fold_is_symmetric_around_midpoint() {
        assert_eq!(fold_draw(HALF), HALF);
        assert_eq!(fold_draw(HALF - 10), HALF + 10);
        assert_eq!(fold_draw(HALF + 10), HALF + 10);
        assert_eq!(fold_draw(0), u64::MAX);
    }

    #[test]
    fn each_draw_has_exactly_one_bucket() {
        for q in [0, 1, HALF - 1, HALF, HALF + 1, Z_TABLE[7], Z_TABLE[7] + 1, u64::MAX] {
            let adjusted = fold_draw(q);
            let hits = (0..Z_TABLE_SIZE)
                .filter(|&z| bucket_contains(z, adjusted))
                .count();
            assert_eq!(hits, 1, "draw {q}");
        }
    }

    #[test]
    fn midpoint_draw_yields_the_mean() {
        assert_eq!(expected_vote_count(300_000, HALF, 0, &PARAMS), Ok(300));
        assert_eq!(expected_vote_count(400_000, HALF, 0, &PARAMS), Ok(400));
    }

    #[test]
    fn draws_above_and_below_midpoint_shift_symmetrically() {
        // bucket 1 covers (T[0], T[1]]; z = 0.14
        let above = Z_TABLE[1];
        let below = HALF - (Z_TABLE[1] - HALF);

        // mean 1000, std = sqrt(999) ~ 31.6, delta = 0.14 * 31.6 ~ 4.4
        assert_eq!(expected_vote_count(1_000_000, above, 1, &PARAMS), Ok(1_004));
        assert_eq!(expected_vote_count(1_000_000, below, 1, &PARAMS), Ok(996));
    }

    #[test]
    fn wrong_bucket_is_rejected() {
        assert_eq!(
            expected_vote_count(300_000, HALF, 1, &PARAMS),
            Err(CommitteeError::WrongBucket)
        );
        assert_eq!(
            expected_vote_count(300_000, Z_TABLE[1], 0, &PARAMS),
            Err(CommitteeError::WrongBucket)
        );
        assert_eq!(
            expected_vote_count(300_000, HALF, Z_TABLE_SIZE, &PARAMS),
            Err(CommitteeError::ZIndexOutOfRange)
        );
    }

    #[test]
    fn tiny_stake_has_no_seat() {
        assert_eq!(
            expected_vote_count(100, HALF, 0, &PARAMS),
            Err(CommitteeError::NoSeat)
        );
        assert_eq!(expected_vote_count(500, HALF, 0, &PARAMS), Ok(1));
    }

    #[test]
    fn quorum_needs_threshold_share_of_committee() {
        let total = 1_000_000;
        // committee of 1000 seats, 660 needed
        assert!(!quorum_reached(300, total, 660, &PARAMS));
        assert!(!quorum_reached(659, total, 660, &PARAMS));
        assert!(quorum_reached(660, total, 660, &PARAMS));
        assert!(quorum_reached(300 + 400, total, 660, &PARAMS));
    }

    #[test]
    fn denominator_is_bounded() {
        assert!(PARAMS.is_valid());
        let widest = CommitteeParams {
            selection_probability_num: MAX_SELECTION_DENOMINATOR - 1,
            selection_probability_den: MAX_SELECTION_DENOMINATOR,
        };
        assert!(widest.is_valid());
        assert!(!CommitteeParams {
            selection_probability_num: 1,
            selection_probability_den: MAX_SELECTION_DENOMINATOR + 1,
        }
        .is_valid());
        assert!(!CommitteeParams {
            selection_probability_num: 2,
            selection_probability_den: 1,
        }
        .is_valid());

        // extremes of a valid configuration stay inside u128
        let votes = expected_vote_count(u64::MAX, u64::MAX, Z_TABLE_SIZE - 1, &widest).unwrap();
        assert!(votes > u64::MAX / 2);
        assert!(quorum_reached(u64::MAX, u64::MAX, 1_000, &widest));
        assert!(!quorum_reached(0, u64::MAX, 1_000, &widest));
    }

    #[test]
    fn isqrt_floors() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(999_000_000), 31_606);
    }
}

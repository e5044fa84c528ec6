// ============================================================
// Error codes
// Format: "E<kind><nn> <kind>: <text>"
//   kind 1 = validation, 2 = state, 3 = authorization, 4 = timeout
// ============================================================

// ── Validation ──

pub const ERR_ZERO_AMOUNT: &str = "E101 validation: amount must be positive";
pub const ERR_WRONG_TOKEN: &str = "E102 validation: unexpected payment token";
pub const ERR_AMOUNT_OVERFLOW: &str = "E103 validation: amount does not fit in 64 bits";
pub const ERR_KEY_TOO_LONG: &str = "E104 validation: request key exceeds 64 bytes";
pub const ERR_INSUFFICIENT_NATIVE_BALANCE: &str = "E105 validation: insufficient native balance";
pub const ERR_INSUFFICIENT_TOKEN_BALANCE: &str = "E106 validation: insufficient token balance";
pub const ERR_BELOW_MINIMUM_STAKE: &str = "E107 validation: stake below minimum";
pub const ERR_UNSTAKE_EXCEEDS_STAKE: &str = "E108 validation: unstake exceeds stake";
pub const ERR_WRONG_RENT_PAYMENT: &str = "E109 validation: payment does not match record rent";
pub const ERR_MALFORMED_RESPONSE: &str = "E110 validation: malformed response body";
pub const ERR_VRF_RESULT_TOO_SHORT: &str = "E111 validation: vrf result shorter than 8 bytes";
pub const ERR_VOTE_COUNT_MISMATCH: &str = "E112 validation: vote count inconsistent with z-table";
pub const ERR_NO_COMMITTEE_SEAT: &str = "E113 validation: participant holds no committee seat";
pub const ERR_VRF_REJECTED: &str = "E114 validation: vrf proof rejected";
pub const ERR_INVALID_SETTINGS: &str = "E115 validation: invalid protocol settings";
pub const ERR_REQUEST_MISMATCH: &str = "E116 validation: response does not match request";
pub const ERR_FEE_SINK_EXHAUSTED: &str = "E117 validation: fee sinks cannot cover refund";
pub const ERR_ZERO_TOTAL_STAKE: &str = "E118 validation: no stake committed before request round";

// ── State ──

pub const ERR_REQUEST_EXISTS: &str = "E201 state: request already exists";
pub const ERR_REQUEST_NOT_FOUND: &str = "E202 state: request not found";
pub const ERR_REQUEST_ALREADY_COMPLETED: &str = "E203 state: request already completed";
pub const ERR_INVALID_STATUS_TRANSITION: &str = "E204 state: invalid status transition";
pub const ERR_NOT_REFUNDABLE: &str = "E205 state: request status is not refundable";
pub const ERR_RETROACTIVE_STAKE_UPDATE: &str = "E206 state: stake update older than current round";
pub const ERR_STAKE_ROUND_IN_FUTURE: &str = "E207 state: stake snapshot newer than requested round";
pub const ERR_ALREADY_VOTED: &str = "E208 state: already voted in this round";
pub const ERR_OTHER_REQUEST_IN_PROGRESS: &str = "E209 state: another request is in progress";
pub const ERR_NO_CURRENT_REQUEST: &str = "E210 state: no request in progress";
pub const ERR_VOTER_NOT_REGISTERED: &str = "E211 state: voter not registered";
pub const ERR_VOTER_ALREADY_REGISTERED: &str = "E212 state: voter already registered";
pub const ERR_VOTE_ROUND_ACTIVE: &str = "E213 state: vote round still active";
pub const ERR_PROPOSAL_NOT_FOUND: &str = "E214 state: proposal not found";
pub const ERR_DOUBLE_SETTLEMENT: &str = "E215 state: rewards already paid out";
pub const ERR_ZERO_STAKE: &str = "E216 state: voter has no stake";
pub const ERR_NOTHING_TO_WITHDRAW: &str = "E217 state: nothing to withdraw";

// ── Authorization ──

pub const ERR_NOT_MANAGER: &str = "E301 authorization: caller is not the manager";
pub const ERR_NOT_REQUESTER: &str = "E302 authorization: caller is not the requester";
pub const ERR_NOT_DEPLOYED_VOTING: &str =
    "E303 authorization: caller is not a registry-deployed voting contract";
pub const ERR_NOT_PARTICIPATION_KEY: &str =
    "E304 authorization: caller is not the registered participation key";

// ── Timeout ──

pub const ERR_STAKE_COOLDOWN: &str = "E401 timeout: stake updated too recently";
pub const ERR_KEY_TIME_LOCK: &str = "E402 timeout: participation key registered too recently";
pub const ERR_REQUEST_NOT_TIMED_OUT: &str = "E403 timeout: request has not timed out";
pub const ERR_REQUEST_EXPIRED: &str = "E404 timeout: request voting window has closed";
pub const ERR_REQUEST_ROUND_NOT_STARTED: &str = "E405 timeout: request round has not passed";

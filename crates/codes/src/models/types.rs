/// Vendor exchange token (e.g. "SHF", "SZSE") - always stored upper-case
pub type Token = String;

/// Futures product root (e.g. "RB", "M") - always stored upper-case
pub type Root = String;

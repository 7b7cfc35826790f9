// Heuristic field extraction from pasted job descriptions.
// Regex only: no network, no model calls, safe to run on every keystroke.

pub mod jd_parser;

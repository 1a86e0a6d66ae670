/// Wire-format enumerations shared by the catalog, preference lists, and
/// the negotiator. Kept separate from the catalog itself so that the IANA
/// code space has exactly one definition.
pub mod enums;

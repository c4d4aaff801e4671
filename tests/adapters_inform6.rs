//! Integration coverage for the Inform6 transcript input dialect over a small synthetic `gametext.txt`.

use zabbrev::adapters::inform6::parse_transcript;
use zabbrev::zversion::ZVersion;

const TRANSCRIPT: &str = "\
I:[Compiled Z-machine version 5]
I: without inline strings size: 24 routine without inline strings size: 24
G:you are standing in an open field
V:take
O:Class
O:Object
O:Routine
O:String
O:a brass lantern
S:Inventory:
H:the lantern flickers and dies
W:west
A:ignored action trace
";

#[test]
fn parses_a_full_synthetic_transcript() {
    let result = parse_transcript(TRANSCRIPT);
    assert_eq!(result.version, Some(ZVersion::V5));

    // G, V, O (real one only), S, H, W => 6 records; the four metaclass
    // O: lines and the A: line are excluded.
    assert_eq!(result.corpus.len(), 6);

    let object_descriptions = result
        .corpus
        .strings
        .iter()
        .filter(|s| s.object_description)
        .count();
    assert_eq!(object_descriptions, 1);

    let packed = result.corpus.strings.iter().filter(|s| s.packed).count();
    assert_eq!(packed, 3); // G, V, S

    let inline_with_routine = result
        .corpus
        .strings
        .iter()
        .filter(|s| s.routine_id.is_some())
        .count();
    assert_eq!(inline_with_routine, 1); // H
}

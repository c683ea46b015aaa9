use keywaykit_core::MotionMode;
use keywaykit_visualizer::build_frames;
use proptest::prelude::*;

fn line() -> impl Strategy<Value = String> {
    let word = |letter: &'static str| {
        proptest::option::of(-500.0f64..500.0).prop_map(move |v| {
            v.map(|v| format!(" {}{:.3}", letter, v)).unwrap_or_default()
        })
    };
    (
        prop_oneof![Just("G0"), Just("G1"), Just("M30")],
        word("X"),
        word("Y"),
        word("Z"),
        word("A"),
    )
        .prop_map(|(m, x, y, z, a)| format!("{}{}{}{}{}", m, x, y, z, a))
}

proptest! {
    #[test]
    fn unspecified_axes_carry_forward(lines in proptest::collection::vec(line(), 1..40)) {
        let frames = build_frames(&lines);
        let motion: Vec<&String> = lines.iter().filter(|l| !l.starts_with('M')).collect();
        prop_assert_eq!(frames.len(), motion.len());
        prop_assert!(frames.len() <= lines.len());

        for i in 1..frames.len() {
            let (prev, cur, text) = (&frames[i - 1], &frames[i], motion[i]);
            if !text.contains('X') { prop_assert_eq!(cur.x, prev.x); }
            if !text.contains('Y') { prop_assert_eq!(cur.y, prev.y); }
            if !text.contains('Z') { prop_assert_eq!(cur.z, prev.z); }
            if !text.contains('A') { prop_assert_eq!(cur.a, prev.a); }

            let expected = if text.starts_with("G1") { MotionMode::Linear } else { MotionMode::Rapid };
            prop_assert_eq!(cur.motion_mode, expected);
        }
    }
}

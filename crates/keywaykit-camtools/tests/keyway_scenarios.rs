use keywaykit_camtools::keyway::{CutSide, KeywayGenerator, KeywayParameters};

fn scenario_a() -> KeywayParameters {
    KeywayParameters {
        start_z: 5.0,
        final_depth_z: -5.0,
        notch_count: 4,
        feed_rate: 100.0,
        depth_per_pass_y: 1.0,
        initial_diameter: 30.0,
        final_diameter: 40.0,
        tool_diameter: 8.0,
        keyway_opening: 10.0,
        cut_side: CutSide::Positive,
        conical_enabled: false,
        conical_angle_deg: 5.0,
        lateral_step_override: None,
    }
}

fn lines(params: KeywayParameters) -> Vec<String> {
    KeywayGenerator::new(params)
        .expect("valid parameters")
        .generate_lines()
}

#[test]
fn test_scenario_a_first_radial_pass() {
    let gcode = lines(scenario_a());

    let expected = [
        "G0 Z100",
        "G0 Y0",
        "G0 X0",
        "G0 A0.00",
        "G0 Z5",
        "G0 Y15",
        "G0 X0",
        "G0 X-1.000",
        "G1 Z-5 F100",
        "G0 Y14.00",
        "G0 Z5",
        "G0 Y15.000",
        "G0 X1.000",
        "G1 Z-5 F100",
        "G0 Y14.00",
        "G0 Z5",
        "G0 X0",
        "G0 Y16.000",
    ];
    assert_eq!(&gcode[..expected.len()], &expected);
}

#[test]
fn test_scenario_a_structure() {
    let generator = KeywayGenerator::new(scenario_a()).unwrap();
    assert_eq!(generator.lateral_plan().offsets(), &[-1.0, 1.0]);
    assert_eq!(generator.geometry().retract_y, 14.0);
    assert_eq!(
        generator.radial_schedule().positions(),
        &[15.0, 16.0, 17.0, 18.0, 19.0, 20.0]
    );

    let gcode = generator.generate_lines();
    // 3 home + 4 notches x (4 header + 6 passes x 10 + 5 steps + 1 close) + 2 end
    assert_eq!(gcode.len(), 3 + 4 * 70 + 2);

    let cuts = gcode.iter().filter(|l| l.starts_with("G1")).count();
    assert_eq!(cuts, 4 * 6 * 2);

    for retract in gcode.iter().filter(|l| l.starts_with("G0 Y1") && l.ends_with(".00")) {
        assert_eq!(retract, "G0 Y14.00");
    }
}

#[test]
fn test_scenario_a_final_pass_closes_at_start_z() {
    let gcode = lines(scenario_a());
    let notch_end = gcode
        .iter()
        .position(|l| l == "G0 A90.00")
        .expect("second notch");

    let tail = &gcode[notch_end - 12..notch_end];
    assert_eq!(
        tail,
        &[
            "G0 Y20.000",
            "G0 X-1.000",
            "G1 Z-5 F100",
            "G0 Y14.00",
            "G0 Z5",
            "G0 Y20.000",
            "G0 X1.000",
            "G1 Z-5 F100",
            "G0 Y14.00",
            "G0 Z5",
            "G0 X0",
            "G0 Z5",
        ]
    );
}

#[test]
fn test_scenario_b_no_lateral_moves() {
    let params = KeywayParameters {
        keyway_opening: 6.0,
        ..scenario_a()
    };
    let gcode = lines(params);

    let x_moves: Vec<_> = gcode.iter().filter(|l| l.contains('X')).collect();
    assert!(x_moves.iter().all(|l| *l == "G0 X0"));
    // Program home plus one per notch header
    assert_eq!(x_moves.len(), 1 + 4);

    assert_eq!(
        &gcode[7..13],
        &[
            "G1 Z-5 F100",
            "G0 Y14.00",
            "G0 Z5",
            "G0 Y16.000",
            "G1 Z-5 F100",
            "G0 Y14.00",
        ]
    );
    assert_eq!(gcode.len(), 3 + 4 * 27 + 2);

    // The last pass of each notch lifts to the start Z once
    let first_notch_end = gcode.iter().position(|l| l == "G0 A90.00").unwrap();
    assert_eq!(
        &gcode[first_notch_end - 4..first_notch_end],
        &["G0 Y20.000", "G1 Z-5 F100", "G0 Y14.00", "G0 Z5"]
    );
}

#[test]
fn test_scenario_c_reversed_direction() {
    let params = KeywayParameters {
        initial_diameter: 40.0,
        final_diameter: 30.0,
        keyway_opening: 6.0,
        ..scenario_a()
    };
    let generator = KeywayGenerator::new(params).unwrap();
    assert!(generator.geometry().cutting_reversed);
    assert_eq!(generator.geometry().radial_increment, -1.0);
    assert_eq!(
        generator.radial_schedule().positions(),
        &[20.0, 19.0, 18.0, 17.0, 16.0, 15.0]
    );

    let gcode = generator.generate_lines();
    assert_eq!(gcode[5], "G0 Y20");
    assert!(gcode.contains(&"G0 Y19.000".to_string()));
    assert!(gcode.contains(&"G0 Y15.000".to_string()));
    assert!(!gcode.contains(&"G0 Y14.000".to_string()));
    // Retract stays below the envelope
    assert!(gcode.contains(&"G0 Y14.00".to_string()));
}

#[test]
fn test_scenario_c_overshoot() {
    let params = KeywayParameters {
        initial_diameter: 40.0,
        final_diameter: 30.0,
        depth_per_pass_y: 1.5,
        keyway_opening: 6.0,
        ..scenario_a()
    };
    let gcode = lines(params);

    let y_steps: Vec<_> = gcode[..gcode.iter().position(|l| l == "G0 A90.00").unwrap()]
        .iter()
        .filter(|l| l.starts_with("G0 Y") && l.matches('.').count() == 1 && l.len() > 8)
        .filter(|l| !l.ends_with("14.00"))
        .cloned()
        .collect();
    assert_eq!(
        y_steps,
        vec!["G0 Y18.500", "G0 Y17.000", "G0 Y15.500", "G0 Y15.000"]
    );
}

#[test]
fn test_scenario_d_conical_cut_combines_y_and_z() {
    let params = KeywayParameters {
        conical_enabled: true,
        conical_angle_deg: 5.0,
        keyway_opening: 6.0,
        ..scenario_a()
    };
    let gcode = lines(params);

    let cuts: Vec<_> = gcode.iter().filter(|l| l.starts_with("G1")).collect();
    assert_eq!(cuts[0], "G1 Y15.437 Z-5 F100 (taper 5deg)");
    assert_eq!(cuts[1], "G1 Y16.437 Z-5 F100 (taper 5deg)");
    assert_eq!(cuts[5], "G1 Y20.437 Z-5 F100 (taper 5deg)");
    assert!(cuts.iter().all(|l| l.contains('Y') && l.contains("Z-5")));
}

#[test]
fn test_negative_cut_side_retracts_above() {
    let params = KeywayParameters {
        cut_side: CutSide::Negative,
        ..scenario_a()
    };
    let gcode = lines(params);
    assert!(gcode.contains(&"G0 Y21.00".to_string()));
    assert!(!gcode.contains(&"G0 Y14.00".to_string()));
}

#[test]
fn test_wide_opening_center_first() {
    let params = KeywayParameters {
        keyway_opening: 20.0,
        ..scenario_a()
    };
    let gcode = lines(params);
    assert_eq!(
        &gcode[7..23],
        &[
            "G0 X0.000",
            "G1 Z-5 F100",
            "G0 Y14.00",
            "G0 Z5",
            "G0 Y15.000",
            "G0 X-6.000",
            "G1 Z-5 F100",
            "G0 Y14.00",
            "G0 Z5",
            "G0 Y15.000",
            "G0 X6.000",
            "G1 Z-5 F100",
            "G0 Y14.00",
            "G0 Z5",
            "G0 X0",
            "G0 Y16.000",
        ]
    );
}

#[test]
fn test_single_notch_angle() {
    let params = KeywayParameters {
        notch_count: 1,
        ..scenario_a()
    };
    let gcode = lines(params);
    let angles: Vec<_> = gcode.iter().filter(|l| l.starts_with("G0 A")).collect();
    assert_eq!(angles, vec!["G0 A0.00"]);
}

#[test]
fn test_three_notch_angles() {
    let params = KeywayParameters {
        notch_count: 3,
        ..scenario_a()
    };
    let gcode = lines(params);
    let angles: Vec<_> = gcode.iter().filter(|l| l.starts_with("G0 A")).collect();
    assert_eq!(angles, vec!["G0 A0.00", "G0 A120.00", "G0 A240.00"]);
}

#[test]
fn test_to_gcode_is_newline_joined() {
    let generator = KeywayGenerator::new(scenario_a()).unwrap();
    let text = generator.to_gcode();
    assert!(text.starts_with("G0 Z100\nG0 Y0\nG0 X0\n"));
    assert!(text.ends_with("G0 Z100\nM30"));
    assert_eq!(text.lines().count(), generator.generate_lines().len());
}

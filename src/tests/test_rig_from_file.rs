#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use std::io::Write;

    use crate::axis_transform::{AxisTransform, PAROL6_RATIOS};
    use crate::parameter_error::ParameterError;
    use crate::parameters::Parameters;
    use crate::planner::PlannerParameters;
    use crate::rig_from_file::Rig;

    const READ_ERROR: &str = "Failed to load rig from file";

    fn assert_same_parameters(expected: &Parameters, loaded: &Parameters) {
        let geometry = |p: &Parameters| [p.a1, p.a2, p.b, p.c1, p.c2, p.c3, p.c4];
        assert_eq!(geometry(expected), geometry(loaded));
        for (e, l) in expected.offsets.iter().zip(loaded.offsets.iter()) {
            assert!((e - l).abs() < 1e-6, "{:?} vs {:?}", expected.offsets, loaded.offsets);
        }
        assert_eq!(expected.sign_corrections, loaded.sign_corrections);
    }

    #[test]
    fn test_rig_from_yaml_file() {
        let rig = Rig::from_yaml_file("src/tests/data/parol6_rig.yaml").expect(READ_ERROR);
        assert_eq!(rig.transform, AxisTransform::new(PAROL6_RATIOS, [0.0; 6]));
        assert_eq!(rig.planner, PlannerParameters::default());
        assert_same_parameters(&Parameters::parol6(), &rig.robot.expect("robot section"));
    }

    #[test]
    fn test_rig_round_trip() {
        let rig = Rig {
            transform: AxisTransform::new([-6.0, -20.0, 20.0, -4.0, -4.0, -10.0], [0.1, 0.0, PI / 2.0, 0.0, -1e-7, 0.0]),
            planner: PlannerParameters { max_iterations: 25, threshold: 0.01, ..PlannerParameters::default() },
            robot: Some(Parameters::irb2400_10()),
        };

        let mut file = tempfile::NamedTempFile::new().expect("temporary file");
        file.write_all(rig.to_yaml().as_bytes()).expect("write rig");
        let loaded = Rig::from_yaml_file(file.path()).expect(READ_ERROR);

        // Values come back bit for bit, not only approximately.
        assert_eq!(loaded, rig);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Rig::from_yaml_file("src/tests/data/no_such_rig.yaml"),
            Err(ParameterError::IoError(_))
        ));
    }

    #[test]
    fn test_missing_ratios() {
        let result = Rig::from_yaml_str("axis_transform:\n  offsets: [0, 0, 0, 0, 0, 0]\n");
        assert!(matches!(result, Err(ParameterError::MissingField(_))));
        assert!(matches!(Rig::from_yaml_str("planner:\n  gain: 1.0\n"), Err(ParameterError::MissingField(_))));
    }

    #[test]
    fn test_wrong_length() {
        let result = Rig::from_yaml_str("axis_transform:\n  ratios: [1, 2, 3]\n");
        match result {
            Err(ParameterError::InvalidLength { field, expected, found }) => {
                assert_eq!((field.as_str(), expected, found), ("ratios", 6, 3));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_invalid_values() {
        let zero_ratio = "axis_transform:\n  ratios: [1, 0, 1, 1, 1, 1]\n";
        assert!(matches!(Rig::from_yaml_str(zero_ratio), Err(ParameterError::ParseError(_))));

        let negative_gain = "axis_transform:\n  ratios: [1, 1, 1, 1, 1, 1]\nplanner:\n  gain: -1.0\n";
        assert!(matches!(Rig::from_yaml_str(negative_gain), Err(ParameterError::ParseError(_))));

        let zero_iterations = "axis_transform:\n  ratios: [1, 1, 1, 1, 1, 1]\nplanner:\n  max_iterations: 0\n";
        assert!(matches!(Rig::from_yaml_str(zero_iterations), Err(ParameterError::ParseError(_))));

        let bad_angle = "axis_transform:\n  ratios: [1, 1, 1, 1, 1, 1]\n  offsets: [0, 0, grad(5), 0, 0, 0]\n";
        assert!(matches!(Rig::from_yaml_str(bad_angle), Err(ParameterError::WrongAngle(_))));

        let bad_sign = "axis_transform:\n  ratios: [1, 1, 1, 1, 1, 1]\nrobot:\n  a1: 0\n  a2: 0\n  b: 0\n  c1: 0.1\n  c2: 0.1\n  c3: 0.1\n  c4: 0.1\n  sign_corrections: [1, 1, 2, 1, 1, 1]\n";
        assert!(matches!(Rig::from_yaml_str(bad_sign), Err(ParameterError::ParseError(_))));
    }

    #[test]
    fn test_planner_from_rig() {
        let rig = Rig::from_yaml_file("src/tests/data/parol6_rig.yaml").expect(READ_ERROR);
        let planner = rig.resolved_rate_planner();
        let shift = planner.plan(&[0.6, 20.0, -30.0, 0.4, -2.0, 1.0], &nalgebra::Vector3::zeros());
        assert!(shift.arrived);
        assert_eq!(shift.path.len(), 1);
    }
}

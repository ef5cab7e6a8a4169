use fusion_stabilizer::{
    anticommutes, update_resource_with_fusions, FusionError, Outcomes, PauliString, Sign,
    Stabilizer, UpdateAction,
};

fn gens(list: &[&str]) -> Vec<Stabilizer> {
    list.iter().map(|s| s.parse().unwrap()).collect()
}

fn meas(list: &[&str]) -> Vec<PauliString> {
    list.iter().map(|s| s.parse().unwrap()).collect()
}

fn outcomes(list: &[(&str, Sign)]) -> Outcomes {
    list.iter()
        .map(|(m, s)| (m.parse().unwrap(), *s))
        .collect()
}

/// The bundled demonstration: GHZ resource, measure XII (+1) then IZI (-1).
#[test]
fn test_ghz_demonstration() {
    let result = update_resource_with_fusions(
        &gens(&["+XXX", "+ZZI", "+IZZ"]),
        &meas(&["XII", "IZI"]),
        &outcomes(&[("XII", Sign::Plus), ("IZI", Sign::Minus)]),
    )
    .unwrap();

    let printed: Vec<String> = result.generators.iter().map(|g| g.pretty()).collect();
    assert_eq!(printed, vec!["-IZI", "+XII", "+IZZ"]);
}

#[test]
fn test_updated_group_commutes_with_measurements() {
    let measurements = meas(&["YII", "IXI"]);
    let result = update_resource_with_fusions(
        &gens(&["+XXX", "+ZZI", "+IZZ"]),
        &measurements,
        &Outcomes::new(),
    )
    .unwrap();

    let last = measurements.last().unwrap();
    for g in &result.generators {
        assert!(!anticommutes(&g.pauli, last).unwrap(), "{} anticommutes with {}", g, last);
    }
    // Generators stay pairwise commuting.
    for a in &result.generators {
        for b in &result.generators {
            assert!(!anticommutes(&a.pauli, &b.pauli).unwrap());
        }
    }
}

#[test]
fn test_bell_pair_fusion_trace() {
    // Bell pairs on qubits (0,1) and (2,3); a ZZ fusion on qubits 1 and 2,
    // followed by XX on the same qubits.
    let resource = gens(&["+XXII", "+ZZII", "+IIXX", "+IIZZ"]);
    let result = update_resource_with_fusions(
        &resource,
        &meas(&["IZZI", "IXXI"]),
        &outcomes(&[("IXXI", Sign::Minus)]),
    )
    .unwrap();

    // IZZI anticommutes with XXII and IIXX; XXII is the pivot and IIXX
    // absorbs it.
    assert_eq!(
        result.steps[0].action,
        UpdateAction::Replaced {
            pivot: 0,
            previous: "+XXII".parse().unwrap(),
            multiplied: vec![2],
        }
    );
    // IXXI anticommutes with ZZII and IIZZ, and commutes with IZZI and XXXX.
    assert_eq!(
        result.steps[1].action,
        UpdateAction::Replaced {
            pivot: 1,
            previous: "+ZZII".parse().unwrap(),
            multiplied: vec![3],
        }
    );
    assert_eq!(result.generators, gens(&["+IZZI", "-IXXI", "+XXXX", "+ZZZZ"]));
}

#[test]
fn test_errors_surface_from_update() {
    let err = update_resource_with_fusions(&gens(&["+XX"]), &meas(&["XXX"]), &Outcomes::new())
        .unwrap_err();
    assert!(matches!(err, FusionError::LengthMismatch { .. }));

    let err = update_resource_with_fusions(&gens(&["+XI", "+ZI"]), &meas(&["YI"]), &Outcomes::new())
        .unwrap_err();
    assert!(matches!(err, FusionError::NonHermitianPhase { .. }));
}

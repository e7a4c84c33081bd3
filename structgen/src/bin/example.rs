//! structgen example - the two reference structures

use structgen::prelude::*;

fn main() {
    println!("=== structgen Example: Continuous Beam ===\n");

    // 5 spans, 17 m overall
    //
    //   joint_0   joint_1   joint_2   joint_3   joint_4   joint_5
    //     #---------o---------o---------o---------o---------o
    //   fixed    roller    roller    roller    roller    roller
    //
    let beam = ContinuousBeam::default()
        .generate()
        .expect("Failed to generate beam");

    for name in &beam.layout.joints {
        let point = beam.model.point(name).unwrap();
        println!("  {:<8} x = {:>5.2} m", name, point.x);
    }
    for combo in beam.model.load_combos() {
        println!("  {} = {}", combo.name, combo.equation());
    }

    let mut host = RecordingApi::new();
    let applied = apply_model(&beam.model, &mut host).expect("Host rejected beam");
    run_analysis(&mut host).expect("Analysis failed");
    println!("\nBeam applied in {} calls", applied.calls);

    let request = ResultRequest {
        frames: vec!["frame_2".to_string()],
        combo: ContinuousBeam::ULS.to_string(),
    };
    let results = fetch_frame_forces(&mut host, &applied, &request).expect("No results");
    for result in &results {
        println!("  {} under {}: {} stations", result.frame, result.combo, result.forces.len());
    }

    println!("\n=== structgen Example: Truss ===\n");

    let truss = PrattTruss::default()
        .generate()
        .expect("Failed to generate truss");
    let summary = truss.model.summary();
    println!("  Bay width: {:.2} m", PrattTruss::default().bay_width());
    println!("  Points:    {}", summary.num_points);
    println!("  Frames:    {}", summary.num_frames);
    println!("  Diagonals: {}", truss.layout.diagonals.len());
    println!("  Posts:     {}", truss.layout.posts.len());

    let mut writer = ScriptWriter::new(Vec::new());
    apply_model(&truss.model, &mut writer).expect("Failed to write script");
    println!("\nTruss script: {} calls", writer.written());
}

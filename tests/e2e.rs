use approx::assert_relative_eq;
use ising_cut::pipeline::run_batch;
use ising_cut::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const TRIANGLE: &str = "1.0,0,1\n2.0,1,2\n1.5,0,2\n";

/// Puts the nodes of `up` on spin +1 and every other node on -1.
struct Fixed {
    up: Vec<NodeId>,
}

impl Solver for Fixed {
    fn method(&self) -> &str {
        "Fixed"
    }
    fn solve(&self, model: &IsingModel) -> Result<SampleSet> {
        let spins: BTreeMap<NodeId, Spin> = model
            .variables()
            .iter()
            .map(|&v| (v, if self.up.contains(&v) { Spin::Up } else { Spin::Down }))
            .collect();
        let energy = model.energy(&spins)?;
        Ok(SampleSet::new(vec![Sample::from_spins(&spins, energy)]))
    }
}

fn make_config(root: &Path, weighted: bool) -> Config {
    Config {
        n: 3,
        k: 2,
        seeds: vec![1],
        weighted,
        graphs_dir: root.join("graphs"),
        output_dir: root.join("solutions"),
        ..Config::default()
    }
}

fn write_graph(config: &Config, seed: u64, content: &str) {
    let params = RunParams {
        n: config.n,
        k: config.k,
        seed,
        weighted: config.weighted,
    };
    let path = config.layout().graph_path(&params);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
pub fn weighted_triangle() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = make_config(temp_dir.path(), true);
    write_graph(&config, 1, TRIANGLE);

    let reports = run_batch(&config, &Fixed { up: vec![2] }).unwrap();
    let written = &reports[0].written;

    assert_eq!(
        written.weight_sum,
        temp_dir
            .path()
            .join("solutions/3/2/sumweights_N3_k2_seed1_seedb1.txt")
    );
    assert_eq!(fs::read_to_string(&written.weight_sum).unwrap(), "4.5\n");

    let record_path = written.record.as_ref().unwrap();
    assert!(record_path.ends_with("akmaxdata_N3_k2_seed1_seedb1_weighted.json"));
    let record = ResultRecord::load(record_path).unwrap();
    assert_eq!(
        record,
        ResultRecord {
            n: 3,
            k: 2,
            seed: 1,
            weighted: true,
            total_weight: 4.5,
            ising_energy: -2.5,
            maxcut_value: 3.5,
            method: "Fixed".into(),
        }
    );
}

#[test]
pub fn unweighted_run_ignores_file_weights() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = make_config(temp_dir.path(), false);
    write_graph(&config, 1, TRIANGLE);

    let report = run_batch(&config, &Fixed { up: vec![2] }).unwrap().pop().unwrap();
    assert_eq!(report.total_weight, 3.0);
    // an odd cycle of unit weights: two of the three edges are cut
    assert_eq!(report.best.unwrap().cut_value, 2.0);
    assert!(
        report
            .written
            .record
            .unwrap()
            .ends_with("akmaxdata_N3_k2_seed1_seedb1_unweighted.json")
    );
}

#[test]
pub fn record_json_layout() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = make_config(temp_dir.path(), true);
    write_graph(&config, 1, TRIANGLE);

    let report = run_batch(&config, &Fixed { up: vec![1] }).unwrap().pop().unwrap();
    let text = fs::read_to_string(report.written.record.unwrap()).unwrap();
    assert!(text.starts_with("{\n    \"N\": 3,\n    \"k\": 2,"));
    assert!(text.contains("\"method\": \"Fixed\""));
    assert!(text.contains("\"maxcut_value\": 3.0"));
}

#[test]
pub fn batch_stops_on_malformed_graph() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = make_config(temp_dir.path(), true);
    config.seeds = vec![1, 2, 3];
    write_graph(&config, 1, TRIANGLE);
    write_graph(&config, 2, "1.0,0,1\n1.0;1;2\n");
    write_graph(&config, 3, TRIANGLE);

    match run_batch(&config, &Fixed { up: vec![2] }) {
        Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("{other:?}"),
    }
    let out = temp_dir.path().join("solutions/3/2");
    assert!(out.join("sumweights_N3_k2_seed1_seedb1.txt").exists());
    assert!(!out.join("sumweights_N3_k2_seed2_seedb2.txt").exists());
    assert!(!out.join("sumweights_N3_k2_seed3_seedb3.txt").exists());
}

#[test]
pub fn graph_without_edges() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = make_config(temp_dir.path(), true);
    write_graph(&config, 1, "");

    let report = run_batch(&config, &Fixed { up: vec![] }).unwrap().pop().unwrap();
    assert_eq!(report.total_weight, 0.);
    let best = report.best.unwrap();
    assert!(best.s0.is_empty() && best.s1.is_empty());
    assert_eq!(best.cut_value, 0.);
}

#[test]
pub fn config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("batch.json");
    fs::write(
        &path,
        r#"{
            "n": 12,
            "k": 4,
            "seeds": [3, 4],
            "weighted": false,
            "solver": {"command": "/opt/akmaxsat"}
        }"#,
    )
    .unwrap();
    let config = Config::load(&path).unwrap();
    assert_eq!((config.n, config.k, config.weighted), (12, 4, false));
    assert_eq!(config.record_prefix, "akmaxdata");
    assert_eq!(config.solver.command, "/opt/akmaxsat");
    assert_eq!(config.solver.method, "AKMaxSAT");
    assert!(matches!(
        Config::load(temp_dir.path().join("missing.json")),
        Err(Error::Open { .. })
    ));
}

#[test]
pub fn load_gzipped_edge_list() {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("graph.txt.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(TRIANGLE.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let g = WeightedGraph::load(&path, Weighting::Weighted).unwrap();
    assert_eq!(g.edge_count(), 3);
    assert_relative_eq!(g.total_weight(), 4.5);
}

#[test]
pub fn write_and_load_graph() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("graph.txt");
    let edges = [(0, 1, 0.3), (1, 2, 1.7), (2, 3, 2.25), (0, 3, 1e-4)];
    WeightedGraph::new(edges).unwrap().write(&path).unwrap();

    let weighted = WeightedGraph::load(&path, Weighting::Weighted).unwrap();
    for (u, v, w) in edges {
        assert_relative_eq!(weighted.weight(u, v).unwrap(), w);
    }
    let unweighted = WeightedGraph::load(&path, Weighting::Unweighted).unwrap();
    assert!(unweighted.edges().all(|(_, _, w)| w == 1.0));
    assert_eq!(unweighted.edge_count(), edges.len());
}

#[cfg(unix)]
#[test]
pub fn external_maxsat_solver() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempfile::tempdir().unwrap();
    // Stands in for akmaxsat: isolates node 2 of the triangle.
    let script = temp_dir.path().join("fake-maxsat");
    fs::write(
        &script,
        "#!/bin/sh\necho 'c fake solver'\necho 'o 2000000'\necho 's OPTIMUM FOUND'\necho 'v -1 -2 3'\nexit 30\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let instance = temp_dir.path().join("model.wcnf");
    let solver = MaxSat {
        command: script.to_str().unwrap().into(),
        instance_path: Some(instance.clone()),
        ..MaxSat::default()
    };
    let config = make_config(temp_dir.path(), true);
    write_graph(&config, 1, TRIANGLE);

    let report = run_batch(&config, &solver).unwrap().pop().unwrap();
    let best = report.best.unwrap();
    assert_eq!(best.s0, vec![0, 1]);
    assert_eq!(best.s1, vec![2]);
    assert_relative_eq!(best.energy, -2.5);
    assert_relative_eq!(best.cut_value, 3.5);

    let wcnf = fs::read_to_string(&instance).unwrap();
    assert!(wcnf.lines().any(|l| l == "p wcnf 3 6 18000001"));

    let record = ResultRecord::load(report.written.record.unwrap()).unwrap();
    assert_eq!(record.method, "AKMaxSAT");
}

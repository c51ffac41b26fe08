use std::thread;

use approx::assert_relative_eq;
use matrix_inspector::{
    reordering, sampling, seeded_rng, CsrMatrix, DenseMatrix, Matrix, Progress, SharedProgress,
};

fn ring(n: usize) -> CsrMatrix<f32> {
    let mut triplets = Vec::with_capacity(2 * n);
    for i in 0..n {
        triplets.push((i, (i + 1) % n, 1.0));
        triplets.push(((i + 1) % n, i, 1.0));
    }
    CsrMatrix::from_triplets(n, n, &triplets).unwrap()
}

/// Runs `op` with a recording sink and returns every increment it reported
fn record<F>(op: F) -> Vec<f64>
where
    F: FnOnce(Progress<'_>),
{
    let mut deltas = Vec::new();
    {
        let mut sink = |d: f64| deltas.push(d);
        op(Progress::new(&mut sink));
    }
    deltas
}

fn assert_complete(deltas: &[f64]) {
    assert!(deltas.iter().all(|&d| d > 0.0), "non-positive report in {:?}", deltas);
    assert_relative_eq!(deltas.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_every_operation_reports_exactly_one() {
    let _ = env_logger::builder().is_test(true).try_init();

    let rows: Vec<usize> = (0..300).step_by(3).collect();
    let perm: Vec<usize> = (0..300).rev().collect();

    assert_complete(&record(|p| ring(300).transpose(p).unwrap()));
    assert_complete(&record(|p| ring(300).reorder(Some(&perm), None, p).unwrap()));
    assert_complete(&record(|p| ring(300).reduce(Some(&rows), Some(&rows), p).unwrap()));
    assert_complete(&record(|p| {
        ring(300).compute_symmetry(p).unwrap();
    }));
    assert_complete(&record(|p| {
        ring(300).compute_stats(p).unwrap();
    }));

    let dense = ring(40).to_dense().unwrap();
    assert_complete(&record(|p| dense.clone().transpose(p).unwrap()));
    assert_complete(&record(|p| {
        let mut dense = DenseMatrix::from_vec(3, 5, (0..15).collect::<Vec<i32>>()).unwrap();
        dense.transpose(p).unwrap();
    }));
}

#[test]
fn test_orchestration_composes() {
    let mut rng = seeded_rng(13);
    assert_complete(&record(|p| {
        reordering::random(&mut ring(64), true, true, true, &mut rng, p).unwrap();
    }));
    assert_complete(&record(|p| {
        reordering::density(&mut ring(64), true, true, true, p).unwrap();
    }));
    assert_complete(&record(|p| {
        sampling::random(&mut ring(64), 10, 10, true, &mut rng, p).unwrap();
    }));
    assert_complete(&record(|p| {
        sampling::threshold_rows(&mut ring(64), 0, 1, p).unwrap();
    }));
}

#[test]
fn test_nested_budget() {
    // an operation inside a half-sized child only fills half of the parent
    let mut total = 0.0;
    {
        let mut sink = |d: f64| total += d;
        let mut progress = Progress::new(&mut sink);
        ring(32).transpose(progress.split(0.5)).unwrap();
        assert_relative_eq!(progress.reported(), 0.5, epsilon = 1e-9);
    }
    assert_relative_eq!(total, 0.5, epsilon = 1e-9);
}

#[test]
fn test_shared_progress_polled_from_another_thread() {
    let shared = SharedProgress::new();
    let mut matrix = ring(2_000);

    thread::scope(|scope| {
        let mut sink = shared.clone();
        let worker = scope.spawn(move || {
            matrix.compute_stats(Progress::new(&mut sink)).unwrap();
        });

        let mut last = 0.0;
        while !worker.is_finished() {
            let now = shared.get();
            assert!(now >= last);
            assert!(now <= 1.0 + 1e-9);
            last = now;
            thread::yield_now();
        }
        worker.join().unwrap();
    });

    assert_relative_eq!(shared.get(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_failed_operation_stays_below_one() {
    let mut total = 0.0;
    {
        let mut sink = |d: f64| total += d;
        let mut matrix = ring(8);
        let bad_perm = [0, 0, 1, 2, 3, 4, 5, 6];
        assert!(matrix
            .reorder(Some(&bad_perm), None, Progress::new(&mut sink))
            .is_err());
    }
    assert!(total < 1.0);
}

use edm_core::errors::EdmError;
use edm_core::rng::RngHandle;
use edm_core::{Candidate, IndexRange, LorentzVector, SpacetimePoint};
use rand::Rng;

/// Generates a well-formed decay cascade with deterministic randomness.
///
/// The event starts from `n_beams` beam candidates. Each of up to `n_decays`
/// steps picks an undecayed candidate (occasionally together with its
/// undecayed right neighbour as co-mother) and appends a contiguous block of
/// one to three daughters that share a production point. Every step therefore
/// introduces exactly one vertex.
pub fn gen_cascade_event(
    n_beams: usize,
    n_decays: usize,
    rng: &mut RngHandle,
) -> Result<Vec<Candidate>, EdmError> {
    if n_beams == 0 {
        return Err(EdmError::graph(
            "empty-event",
            "cascade generator requires at least one beam candidate",
        ));
    }
    let mut candidates: Vec<Candidate> = (0..n_beams)
        .map(|index| Candidate::new(index, 2212).with_momentum(random_momentum(rng, 0.938)))
        .collect();
    let mut open: Vec<usize> = (0..n_beams).collect();

    for _ in 0..n_decays {
        if open.is_empty() {
            break;
        }
        let pick = rng.gen_range(0..open.len());
        let first_mother = open[pick];
        let last_mother = if open.contains(&(first_mother + 1)) && rng.gen_bool(0.25) {
            first_mother + 1
        } else {
            first_mother
        };
        open.retain(|idx| *idx < first_mother || *idx > last_mother);

        let n_daughters = rng.gen_range(1..=3usize);
        let first = candidates.len();
        let last = first + n_daughters - 1;
        for mother in first_mother..=last_mother {
            candidates[mother].daughters = IndexRange::new(first, last);
        }

        let base_t = candidates[first_mother].position.t;
        let position = SpacetimePoint::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-5.0..5.0),
            base_t + rng.gen_range(0.0..1.0),
        );
        for index in first..=last {
            let pdg = [11, -11, 22, 211, -211][rng.gen_range(0..5)];
            let charge = match pdg {
                11 | -211 => -1,
                -11 | 211 => 1,
                _ => 0,
            };
            candidates.push(
                Candidate::new(index, pdg)
                    .with_mothers(first_mother, last_mother)
                    .with_position(position)
                    .with_charge(charge)
                    .with_momentum(random_momentum(rng, 0.0)),
            );
            open.push(index);
        }
    }

    Ok(candidates)
}

fn random_momentum(rng: &mut RngHandle, mass: f64) -> LorentzVector {
    LorentzVector::new(
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-200.0..200.0),
        mass,
    )
}

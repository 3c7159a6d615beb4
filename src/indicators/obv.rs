// =============================================================================
// On-Balance Volume (OBV)
// =============================================================================
//
// Cumulative volume-flow indicator: add the bar's volume when close rises
// versus the previous close, subtract it when close falls, carry the running
// total unchanged when close is flat.
//
// The fold starts at `volume[0]` (the upstream convention), so OBV has no
// warm-up span — it is defined at every index.

/// Compute the OBV series; one defined entry per bar.
pub fn calculate_obv(closes: &[f64], volumes: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return out;
    }

    let mut obv = volumes[0];
    out.push(obv);

    for i in 1..closes.len() {
        if closes[i] > closes[i - 1] {
            obv += volumes[i];
        } else if closes[i] < closes[i - 1] {
            obv -= volumes[i];
        }
        out.push(obv);
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obv_starts_at_first_volume() {
        let obv = calculate_obv(&[100.0], &[500.0]);
        assert_eq!(obv, vec![500.0]);
    }

    #[test]
    fn obv_adds_on_up_subtracts_on_down() {
        let closes = vec![100.0, 101.0, 100.5, 100.5, 102.0];
        let volumes = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let obv = calculate_obv(&closes, &volumes);
        // 10, +20 => 30, -30 => 0, flat => 0, +50 => 50
        assert_eq!(obv, vec![10.0, 30.0, 0.0, 0.0, 50.0]);
    }

    #[test]
    fn obv_flat_series_stays_constant() {
        let closes = vec![100.0; 10];
        let volumes = vec![1000.0; 10];
        let obv = calculate_obv(&closes, &volumes);
        assert!(obv.iter().all(|&v| v == 1000.0));
    }

    #[test]
    fn obv_empty_input() {
        assert!(calculate_obv(&[], &[]).is_empty());
    }
}

use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Сдвиг по Y для второй выборки искажения, чтобы смещения по осям не коррелировали
pub const WARP_DECORRELATION_OFFSET: f32 = 1000.0;

/// Когерентный шум с детерминированным результатом для заданного сида
///
/// Частота передаётся при каждой выборке: внутренняя частота `FastNoiseLite` зафиксирована
/// на 1.0, а координаты масштабируются снаружи. Так одна и та же таблица градиентов
/// обслуживает все октавы.
pub struct NoiseField {
    noise: FastNoiseLite,
}

impl NoiseField {
    pub fn new(seed: i64) -> Self {
        let mut noise = FastNoiseLite::with_seed(fold_seed(seed));
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0));
        Self { noise }
    }

    /// Значение шума в точке `(x, y)` на частоте `frequency`, в диапазоне `[-1, 1]`
    #[inline]
    pub fn sample(&self, x: f32, y: f32, frequency: f32) -> f32 {
        self.noise
            .get_noise_2d(x * frequency, y * frequency)
            .clamp(-1.0, 1.0)
    }
}

/// Сворачивает 64-битный сид в 32-битный сид `FastNoiseLite`, учитывая обе половины
fn fold_seed(seed: i64) -> i32 {
    (seed ^ (seed >> 32)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_samples() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(42);
        for i in 0..50 {
            let x = i as f32 * 1.7;
            let y = i as f32 * 0.3;
            assert_eq!(a.sample(x, y, 0.05).to_bits(), b.sample(x, y, 0.05).to_bits());
        }
    }

    #[test]
    fn samples_stay_in_unit_range() {
        let field = NoiseField::new(-3);
        for y in 0..40 {
            for x in 0..40 {
                let v = field.sample(x as f32, y as f32, 0.13);
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn high_bits_of_seed_matter() {
        assert_ne!(fold_seed(1), fold_seed(1 | (1 << 40)));
        assert_eq!(fold_seed(7), 7);
    }
}

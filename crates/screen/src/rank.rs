//! Сортировка кандидатов по убыванию критерия. NaN уходит в конец,
//! равные значения сохраняют входной порядок.

pub fn rank_descending<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    let score = |t: &T| {
        let v = key(t);
        if v.is_nan() { f64::NEG_INFINITY } else { v }
    };

    items.sort_by(|a, b| score(b).total_cmp(&score(a)));
}

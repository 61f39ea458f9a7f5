use rayon::{
    iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed nearest source row/column for every destination pixel
pub struct ScaleLut {
    xs: Vec<usize>,
    ys: Vec<usize>,
    src: (usize, usize),
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            xs: Vec::new(),
            ys: Vec::new(),
            src: (0, 0),
        }
    }

    /// True if this table was built for exactly these dimensions.
    pub fn fits(&self, dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> bool {
        self.xs.len() == dst_w && self.ys.len() == dst_h && self.src == (src_w, src_h)
    }
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    let axis = |dst: usize, src: usize| -> Vec<usize> {
        if src == 0 {
            return vec![0; dst];
        }
        let scale = src as f32 / dst as f32;
        (0..dst)
            .map(|i| (((i as f32 + 0.5) * scale) as usize).min(src - 1))
            .collect()
    };

    ScaleLut {
        xs: axis(dst_w, src_w),
        ys: axis(dst_h, src_h),
        src: (src_w, src_h),
    }
}

/// Parallel nearest-neighbour stretch, one destination row per task
pub fn blit_nearest(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &ScaleLut) {
    if dw == 0 {
        return;
    }
    dst.par_chunks_mut(dw)
        .zip(lut.ys.par_iter())
        .for_each(|(dst_row, &sy)| {
            let row = &src[sy * sw..(sy + 1) * sw];
            for (d, &sx) in dst_row.iter_mut().zip(&lut.xs) {
                *d = row[sx];
            }
        });
}

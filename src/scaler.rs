use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Part of the window the frame is drawn into, aspect ratio preserved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Largest centred rectangle of the source aspect ratio that fits the window.
pub fn fit_viewport(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Viewport {
    if dst_w == 0 || dst_h == 0 || src_w == 0 || src_h == 0 {
        return Viewport::default();
    }
    let scale = (dst_w as f32 / src_w as f32).min(dst_h as f32 / src_h as f32);
    let width = ((src_w as f32 * scale).round() as usize).clamp(1, dst_w);
    let height = ((src_h as f32 * scale).round() as usize).clamp(1, dst_h);
    Viewport {
        x: (dst_w - width) / 2,
        y: (dst_h - height) / 2,
        width,
        height,
    }
}

/// Precomputed mapping from viewport pixels to source neighbours + weights
pub struct ScaleLut {
    target: (usize, usize),
    viewport: Viewport,
    x0: Vec<usize>,
    x1: Vec<usize>,
    wx: Vec<u16>,
    y0: Vec<usize>,
    y1: Vec<usize>,
    wy: Vec<u16>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            target: (0, 0),
            viewport: Viewport::default(),
            x0: Vec::new(),
            x1: Vec::new(),
            wx: Vec::new(),
            y0: Vec::new(),
            y1: Vec::new(),
            wy: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether this table was built for a `dst_w` x `dst_h` window buffer.
    pub fn fits(&self, dst_w: usize, dst_h: usize) -> bool {
        self.target == (dst_w, dst_h)
    }
}

/// Source index pairs and 8.8 fixed-point weights along one axis, sampling at pixel
/// centres.
fn axis_lut(dst: usize, src: usize) -> (Vec<usize>, Vec<usize>, Vec<u16>) {
    let mut i0 = vec![0; dst];
    let mut i1 = vec![0; dst];
    let mut w = vec![0; dst];
    let s = src as f32 / dst as f32;
    for i in 0..dst {
        let f = ((i as f32 + 0.5) * s - 0.5).max(0.0);
        let lo = (f.floor() as usize).min(src - 1);
        i0[i] = lo;
        i1[i] = (lo + 1).min(src - 1);
        w[i] = ((f - lo as f32) * 256.0).round().min(256.0) as u16;
    }
    (i0, i1, w)
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    let viewport = fit_viewport(dst_w, dst_h, src_w, src_h);
    if viewport.width == 0 {
        return ScaleLut {
            target: (dst_w, dst_h),
            ..ScaleLut::empty()
        };
    }
    let (x0, x1, wx) = axis_lut(viewport.width, src_w);
    let (y0, y1, wy) = axis_lut(viewport.height, src_h);
    ScaleLut {
        target: (dst_w, dst_h),
        viewport,
        x0,
        x1,
        wx,
        y0,
        y1,
        wy,
    }
}

#[inline]
fn lerp_color_u32(a: u32, b: u32, w256: u32) -> u32 {
    // w256 in [0, 256]; inv = 256 - w256
    let inv = 256 - w256;
    // R and B together (00RR00BB), G on its own
    let rb = ((a & 0x00FF00FF) * inv + (b & 0x00FF00FF) * w256) >> 8 & 0x00FF00FF;
    let g = ((a & 0x0000FF00) * inv + (b & 0x0000FF00) * w256) >> 8 & 0x0000FF00;
    rb | g
}

/// Bilinear upscale of `src` into the viewport of `dst`, black bars around it.
/// Presentation only: runs after the frame is complete, rows in parallel.
pub fn blit_letterboxed(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &ScaleLut) {
    let vp = lut.viewport;
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        if vp.width == 0 || y < vp.y || y >= vp.y + vp.height {
            dst_row.fill(0);
            return;
        }
        dst_row[..vp.x].fill(0);
        dst_row[vp.x + vp.width..].fill(0);

        let ly = y - vp.y;
        let row0 = lut.y0[ly] * sw;
        let row1 = lut.y1[ly] * sw;
        let wy = lut.wy[ly] as u32;
        for (lx, out) in dst_row[vp.x..vp.x + vp.width].iter_mut().enumerate() {
            let x0 = lut.x0[lx];
            let x1 = lut.x1[lx];
            let wx = lut.wx[lx] as u32;

            let top = lerp_color_u32(src[row0 + x0], src[row0 + x1], wx);
            let bot = lerp_color_u32(src[row1 + x0], src[row1 + x1], wx);
            *out = lerp_color_u32(top, bot, wy);
        }
    });
}

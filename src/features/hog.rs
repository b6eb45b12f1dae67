// Gradient-orientation descriptor over a tall grayscale view of the leaf.
//
// Fixed geometry: a 64x128 input, 8x8-pixel cells, 2x2-cell blocks with a
// one-cell stride, 9 unsigned orientation bins of 20 degrees each. Gradients
// are central differences (zero on the image border), each pixel votes its
// full magnitude into one orientation bin, and cell histograms hold the mean
// vote over the cell's 64 pixels. Blocks are L2-Hys normalized (L2, clip at
// 0.2, L2 again) and emitted row-major.

use image::GrayImage;

/// Width the grayscale image is resized to before the descriptor runs.
pub const HOG_WIDTH: u32 = 64;
/// Height the grayscale image is resized to before the descriptor runs.
pub const HOG_HEIGHT: u32 = 128;

const ORIENTATIONS: usize = 9;
const BIN_WIDTH_DEG: f64 = 180.0 / ORIENTATIONS as f64;
const CELL_SIZE: usize = 8;
const BLOCK_CELLS: usize = 2;

const CELLS_X: usize = HOG_WIDTH as usize / CELL_SIZE; // 8
const CELLS_Y: usize = HOG_HEIGHT as usize / CELL_SIZE; // 16
const BLOCKS_X: usize = CELLS_X - BLOCK_CELLS + 1; // 7
const BLOCKS_Y: usize = CELLS_Y - BLOCK_CELLS + 1; // 15

/// Descriptor length for the canonical 64x128 geometry.
pub const HOG_LEN: usize = BLOCKS_Y * BLOCKS_X * BLOCK_CELLS * BLOCK_CELLS * ORIENTATIONS;

const L2_HYS_EPS: f32 = 1e-5;
const L2_HYS_CLIP: f32 = 0.2;

/// Compute the descriptor for a 64x128 grayscale image.
pub fn descriptor(gray: &GrayImage) -> Vec<f32> {
    debug_assert_eq!(gray.width(), HOG_WIDTH);
    debug_assert_eq!(gray.height(), HOG_HEIGHT);

    let w = gray.width() as usize;
    let h = gray.height() as usize;
    let img: Vec<f32> = gray.as_raw().iter().map(|&v| v as f32).collect();

    // Per-pixel magnitude and orientation bin. Central differences; border
    // pixels get a zero gradient component in the clipped direction.
    let mut magnitude = vec![0.0f32; w * h];
    let mut bin_index = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            let gx = if x == 0 || x == w - 1 {
                0.0
            } else {
                img[y * w + x + 1] - img[y * w + x - 1]
            };
            let gy = if y == 0 || y == h - 1 {
                0.0
            } else {
                img[(y + 1) * w + x] - img[(y - 1) * w + x]
            };
            magnitude[y * w + x] = (gx * gx + gy * gy).sqrt();

            // Unsigned orientation folded into [0, 180).
            let mut angle = (gy as f64).atan2(gx as f64).to_degrees();
            if angle < 0.0 {
                angle += 180.0;
            }
            if angle >= 180.0 {
                angle -= 180.0;
            }
            bin_index[y * w + x] = ((angle / BIN_WIDTH_DEG) as usize).min(ORIENTATIONS - 1) as u8;
        }
    }

    // Cell histograms: mean magnitude vote per orientation bin.
    let cell_px = (CELL_SIZE * CELL_SIZE) as f32;
    let mut cells = vec![[0.0f32; ORIENTATIONS]; CELLS_Y * CELLS_X];
    for y in 0..h {
        let cy = y / CELL_SIZE;
        for x in 0..w {
            let cx = x / CELL_SIZE;
            cells[cy * CELLS_X + cx][bin_index[y * w + x] as usize] += magnitude[y * w + x];
        }
    }
    for hist in cells.iter_mut() {
        for v in hist.iter_mut() {
            *v /= cell_px;
        }
    }

    // Overlapping 2x2 blocks, L2-Hys normalized, flattened row-major:
    // block row, block col, cell row, cell col, orientation.
    let mut out = Vec::with_capacity(HOG_LEN);
    let mut block = [0.0f32; BLOCK_CELLS * BLOCK_CELLS * ORIENTATIONS];
    for by in 0..BLOCKS_Y {
        for bx in 0..BLOCKS_X {
            let mut i = 0;
            for cy in by..by + BLOCK_CELLS {
                for cx in bx..bx + BLOCK_CELLS {
                    block[i..i + ORIENTATIONS].copy_from_slice(&cells[cy * CELLS_X + cx]);
                    i += ORIENTATIONS;
                }
            }
            l2_hys(&mut block);
            out.extend_from_slice(&block);
        }
    }

    debug_assert_eq!(out.len(), HOG_LEN);
    out
}

/// L2 normalize, clip at 0.2, L2 normalize again.
fn l2_hys(block: &mut [f32]) {
    let eps_sq = L2_HYS_EPS * L2_HYS_EPS;
    let norm = (block.iter().map(|v| v * v).sum::<f32>() + eps_sq).sqrt();
    for v in block.iter_mut() {
        *v = (*v / norm).min(L2_HYS_CLIP);
    }
    let norm = (block.iter().map(|v| v * v).sum::<f32>() + eps_sq).sqrt();
    for v in block.iter_mut() {
        *v /= norm;
    }
}

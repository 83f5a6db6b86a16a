//! Letterbox/pillarbox quad fitting.

use crate::data::types::QuadVertex;

/// Fits a `source_w x source_h` rectangle into a `dest_w x dest_h` viewport
/// preserving aspect ratio, by scaling exactly one axis of the canonical
/// stretch-to-fit quad. Passing a negative `source_h` marks a vertically
/// flipped source image and complements every texcoord V (v -> 1 - v); the
/// magnitude is used for the ratio.
///
/// Vertices come back in triangle-strip order.
pub fn letterbox_quad(source_w: i32, source_h: i32, dest_w: u32, dest_h: u32) -> [QuadVertex; 4] {
    // Stretch to fit. V runs 1 at the bottom edge to 0 at the top, matching
    // texture origin top-left.
    let mut quad = [
        QuadVertex { position: [-1.0, -1.0], texcoord: [0.0, 1.0] },
        QuadVertex { position: [ 1.0, -1.0], texcoord: [1.0, 1.0] },
        QuadVertex { position: [-1.0,  1.0], texcoord: [0.0, 0.0] },
        QuadVertex { position: [ 1.0,  1.0], texcoord: [1.0, 0.0] },
    ];

    if source_h < 0 {
        for v in &mut quad {
            v.texcoord[1] = 1.0 - v.texcoord[1];
        }
    }

    let source_ratio = source_w as f32 / source_h.unsigned_abs() as f32;
    let dest_ratio = dest_w as f32 / dest_h as f32;

    if source_ratio > dest_ratio {
        // Horizontal fit: letterbox by shrinking Y.
        let s = dest_ratio / source_ratio;
        for v in &mut quad {
            v.position[1] *= s;
        }
    } else {
        // Vertical fit: pillarbox by shrinking X.
        let s = source_ratio / dest_ratio;
        for v in &mut quad {
            v.position[0] *= s;
        }
    }

    quad
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xs(quad: &[QuadVertex; 4]) -> Vec<f32> {
        quad.iter().map(|v| v.position[0]).collect()
    }

    fn ys(quad: &[QuadVertex; 4]) -> Vec<f32> {
        quad.iter().map(|v| v.position[1]).collect()
    }

    #[test]
    fn test_matching_ratios_keep_unit_quad() {
        let quad = letterbox_quad(853, 480, 853, 480);
        assert_eq!(xs(&quad), vec![-1.0, 1.0, -1.0, 1.0]);
        assert_eq!(ys(&quad), vec![-1.0, -1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_wide_source_letterboxes_y() {
        // 16:9 into 4:3 shrinks Y by (4/3)/(16/9) = 0.75.
        let quad = letterbox_quad(16, 9, 4, 3);
        assert_eq!(xs(&quad), vec![-1.0, 1.0, -1.0, 1.0]);
        assert_eq!(ys(&quad), vec![-0.75, -0.75, 0.75, 0.75]);
    }

    #[test]
    fn test_tall_source_pillarboxes_x() {
        // 4:3 into 16:9 shrinks X by (4/3)/(16/9) = 0.75.
        let quad = letterbox_quad(4, 3, 16, 9);
        assert_eq!(xs(&quad), vec![-0.75, 0.75, -0.75, 0.75]);
        assert_eq!(ys(&quad), vec![-1.0, -1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_negative_source_height_flips_v_only() {
        let flipped = letterbox_quad(4, -3, 16, 9);
        let straight = letterbox_quad(4, 3, 16, 9);
        for (f, s) in flipped.iter().zip(straight.iter()) {
            assert_eq!(f.position, s.position);
            assert_eq!(f.texcoord[0], s.texcoord[0]);
            assert_eq!(f.texcoord[1], 1.0 - s.texcoord[1]);
        }
        // Fit branch unaffected by the flip convention.
        assert_eq!(xs(&flipped), vec![-0.75, 0.75, -0.75, 0.75]);
    }
}

use std::io::{self, Write};

use crate::control::{euler_error_degrees, BodyState};
use crate::placement::Monitor;

/// Write one row per monitor.
///
/// Columns: column, row, columns, rows, center_x, center_y, size_x, size_y,
///          pos_x, pos_y, scale_x, scale_y, uv_min_x, uv_min_y, uv_max_x,
///          uv_max_y, crop_x, crop_y, crop_w, crop_h, mass
pub fn write_layout<W: Write, M>(writer: &mut W, monitors: &[Monitor<M>]) -> io::Result<()> {
    writeln!(
        writer,
        "column,row,columns,rows,center_x,center_y,size_x,size_y,\
         pos_x,pos_y,scale_x,scale_y,uv_min_x,uv_min_y,uv_max_x,uv_max_y,\
         crop_x,crop_y,crop_w,crop_h,mass"
    )?;

    for m in monitors {
        let fp = &m.cell.footprint;
        let p = &m.placement;
        writeln!(
            writer,
            "{},{},{},{},{:.6},{:.6},{:.6},{:.6},\
             {:.4},{:.4},{:.4},{:.4},{:.6},{:.6},{:.6},{:.6},\
             {},{},{},{},{:.4}",
            fp.column, fp.row, fp.columns, fp.rows,
            m.cell.position.x, m.cell.position.y, m.cell.size.x, m.cell.size.y,
            p.position.x, p.position.y, p.scale.x, p.scale.y,
            p.uv.min.x, p.uv.min.y, p.uv.max.x, p.uv.max.y,
            p.crop.x, p.crop.y, p.crop.width, p.crop.height,
            p.mass,
        )?;
    }

    Ok(())
}

/// Write a settle trajectory.
///
/// Columns: time, pos_x, pos_y, pos_z, vel_x, vel_y, vel_z,
///          roll_deg, pitch_deg, yaw_deg, omega_x, omega_y, omega_z
pub fn write_settle<W: Write>(writer: &mut W, trajectory: &[BodyState]) -> io::Result<()> {
    writeln!(
        writer,
        "time,pos_x,pos_y,pos_z,vel_x,vel_y,vel_z,\
         roll_deg,pitch_deg,yaw_deg,omega_x,omega_y,omega_z"
    )?;

    for s in trajectory {
        let e = euler_error_degrees(&s.rotation);
        writeln!(
            writer,
            "{:.4},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},\
             {:.4},{:.4},{:.4},{:.6},{:.6},{:.6}",
            s.time,
            s.position.x, s.position.y, s.position.z,
            s.velocity.x, s.velocity.y, s.velocity.z,
            e.x, e.y, e.z,
            s.angular_velocity.x, s.angular_velocity.y, s.angular_velocity.z,
        )?;
    }

    Ok(())
}

/// Write a layout to a CSV file at the given path.
pub fn write_layout_file<M>(path: &str, monitors: &[Monitor<M>]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_layout(&mut file, monitors)
}

/// Write a settle trajectory to a CSV file at the given path.
pub fn write_settle_file(path: &str, trajectory: &[BodyState]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_settle(&mut file, trajectory)
}

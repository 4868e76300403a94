use crate::cartridge::segment_table::SegmentTable;

#[test]
fn test_single_4k_segment() {
    let mut table = SegmentTable::new(12, 0x2000);

    assert_eq!(0x1000, table.bank_size());
    assert_eq!(0x0FFF, table.bank_mask());
    assert_eq!(2, table.bank_count());
    assert_eq!(1, table.bank_segs());

    assert_eq!(0x0123, table.image_offset(0x1123));
    assert_eq!(0x1000, table.map(1, 0));
    assert_eq!(0x1123, table.image_offset(0x1123));
    assert_eq!(0x1123, table.image_offset(0xF123));
    assert_eq!(1, table.bank(0));
}

#[test]
fn test_1k_segments() {
    let mut table = SegmentTable::new(10, 0x2000);

    assert_eq!(8, table.bank_count());
    assert_eq!(4, table.bank_segs());
    assert_eq!(3, table.segment_of(0x1FFF));
    assert_eq!(1, table.segment_of(0x1400));
    assert_eq!(0x0800, table.segment_base(2));

    table.map(7, 3);
    table.map(2, 1);

    assert_eq!(0x1C00, table.image_offset(0x1C00));
    assert_eq!(0x1FFF, table.image_offset(0x1FFF));
    assert_eq!(0x0800, table.image_offset(0x1400));
    assert_eq!(0x0000, table.image_offset(0x1000));
    assert_eq!(7, table.bank(3));
    assert_eq!(2, table.bank(1));
    assert_eq!(0, table.bank(0));
}

#[test]
fn test_every_bank_in_every_segment() {
    let mut table = SegmentTable::new(11, 0x8000);

    for segment in 0..table.bank_segs() {
        for bank in 0..table.bank_count() {
            table.map(bank, segment);
            assert_eq!(bank, table.bank(segment));
            assert_eq!(
                (bank as usize) << 11,
                table.image_offset(0x1000 + table.segment_base(segment))
            );
        }
    }
}

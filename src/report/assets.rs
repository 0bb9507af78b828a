//! Inline stylesheet and script embedded in every report so it opens offline.

pub const STYLE: &str = r#"
        * { box-sizing: border-box; }
        body { font-family: "Segoe UI", system-ui, -apple-system, sans-serif; margin: 0; background: #f3f2f1; color: #323130; }
        .report-header { background: #0078d4; color: white; padding: 24px 40px; }
        .report-header h1 { margin: 0 0 8px 0; font-weight: 600; }
        .meta { display: flex; flex-wrap: wrap; gap: 24px; font-size: 14px; opacity: 0.9; }
        main { padding: 24px 40px; }
        .overview { display: flex; flex-wrap: wrap; gap: 16px; margin-bottom: 24px; }
        .card { background: white; border-radius: 8px; padding: 16px 20px; min-width: 160px; box-shadow: 0 1px 3px rgba(0,0,0,0.12); }
        .card .value { font-size: 28px; font-weight: 600; }
        .card .label { font-size: 13px; color: #605e5c; }
        .card.critical .value { color: #a4262c; }
        .card.high .value { color: #ca5010; }
        .search-box { margin-bottom: 24px; }
        .search-box input { width: 100%; max-width: 480px; padding: 10px 14px; font-size: 14px; border: 1px solid #c8c6c4; border-radius: 4px; }
        section.category { background: white; border-radius: 8px; padding: 16px 20px; margin-bottom: 24px; box-shadow: 0 1px 3px rgba(0,0,0,0.12); }
        section.category h2 { margin: 0 0 12px 0; font-size: 20px; }
        section.category h2 .count { color: #605e5c; font-weight: normal; font-size: 16px; }
        table { border-collapse: collapse; width: 100%; }
        th, td { padding: 8px 10px; text-align: left; border-bottom: 1px solid #edebe9; font-size: 14px; }
        th { background: #faf9f8; font-weight: 600; }
        tr.summary-row.expandable { cursor: pointer; }
        tr.summary-row.expandable:hover { background: #f3f9fd; }
        td.toggle { width: 28px; text-align: center; color: #605e5c; }
        .caret { display: inline-block; transition: transform 0.15s; }
        .caret.open { transform: rotate(90deg); }
        .no-data { color: #a19f9d; }
        .bar { background: #edebe9; border-radius: 4px; height: 12px; width: 180px; overflow: hidden; }
        .bar-fill { height: 100%; border-radius: 4px; }
        .bar-fill.tier-critical { background: #d13438; }
        .bar-fill.tier-high { background: #ff8c00; }
        .bar-fill.tier-medium { background: #ffb900; }
        .bar-fill.tier-low { background: #107c10; }
        .pct.tier-critical { color: #a4262c; font-weight: 600; }
        .pct.tier-high { color: #ca5010; font-weight: 600; }
        .pct.tier-medium { color: #8a6d00; }
        .pct.tier-low { color: #107c10; }
        tr.detail-row > td { background: #faf9f8; padding: 0 10px 12px 38px; }
        .detail-table th, .detail-table td { font-size: 13px; padding: 6px 8px; }
        .empty-row td { color: #a19f9d; font-style: italic; text-align: center; }
        footer { padding: 16px 40px 32px 40px; color: #605e5c; font-size: 13px; }
"#;

pub const SCRIPT: &str = r#"
        function toggleDetail(id) {
            var detail = document.getElementById(id);
            if (!detail) { return; }
            var open = detail.getAttribute('data-open') === 'true';
            detail.setAttribute('data-open', open ? 'false' : 'true');
            detail.style.display = open ? 'none' : 'table-row';
            var caret = document.getElementById('caret-' + id);
            if (caret) { caret.classList.toggle('open', !open); }
        }

        function filterRows(query) {
            var q = query.trim().toLowerCase();
            document.querySelectorAll('section.category').forEach(function (section) {
                var shown = 0;
                section.querySelectorAll('tr.summary-row').forEach(function (row) {
                    var visible = q === '' || row.textContent.toLowerCase().indexOf(q) !== -1;
                    row.style.display = visible ? '' : 'none';
                    if (visible) { shown += 1; }
                    var id = row.getAttribute('data-detail');
                    if (id) {
                        var detail = document.getElementById(id);
                        if (detail) {
                            var open = detail.getAttribute('data-open') === 'true';
                            detail.style.display = visible && open ? 'table-row' : 'none';
                        }
                    }
                });
                var counter = section.querySelector('.visible-count');
                if (counter) { counter.textContent = shown; }
            });
        }
"#;
